//! Generator configuration.
//!
//! Handles loading and validating an optional `config.toml` placed at the
//! source root. Every knob has a documented default, so a bare tree needs
//! no config at all.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [thumbnails]
//! size = 200                # Square bounding box edge in pixels
//!
//! [web]
//! max_edge = 1920           # Longest edge cap; smaller images never upscale
//! quality = 85              # JPEG quality (1-100) for web derivatives
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only bump the web size cap
//! [web]
//! max_edge = 2560
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Thumbnail generation settings.
    pub thumbnails: ThumbnailsConfig,
    /// Web derivative settings.
    pub web: WebConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl GeneratorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.size == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.size must be non-zero".into(),
            ));
        }
        if self.thumbnails.quality == 0 || self.thumbnails.quality > 100 {
            return Err(ConfigError::Validation(
                "thumbnails.quality must be 1-100".into(),
            ));
        }
        if self.web.max_edge == 0 {
            return Err(ConfigError::Validation("web.max_edge must be non-zero".into()));
        }
        if self.web.quality == 0 || self.web.quality > 100 {
            return Err(ConfigError::Validation("web.quality must be 1-100".into()));
        }
        Ok(())
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Square bounding box edge in pixels.
    pub size: u32,
    /// JPEG encoding quality for thumbnails whose source is JPEG.
    /// PNG and GIF thumbnails are lossless; this does not affect them.
    pub quality: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            size: 200,
            quality: 85,
        }
    }
}

/// Web derivative settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebConfig {
    /// Cap on the longer edge in pixels; smaller sources are never upscaled.
    pub max_edge: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            max_edge: 1920,
            quality: 85,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load `config.toml` from the source root, falling back to defaults when
/// the file doesn't exist. Parse and validation errors are fatal.
pub fn load_config(source_root: &Path) -> Result<GeneratorConfig, ConfigError> {
    let path = source_root.join("config.toml");
    if !path.exists() {
        return Ok(GeneratorConfig::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: GeneratorConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A stock `config.toml` with every option present and documented.
pub fn stock_config_toml() -> String {
    "\
# album-press configuration
# Place this file at the source root (next to the album directories).
# Every option is optional; the values below are the defaults.

[thumbnails]
# Square bounding box edge in pixels. Images are contain-fitted and padded
# with transparent background to fill the box exactly.
size = 200
# JPEG quality (1-100) for thumbnails with a JPEG source. PNG and GIF
# thumbnails are lossless and ignore this.
quality = 85

[web]
# Longest edge cap for web derivatives. Images already smaller than this
# are re-encoded but never upscaled.
max_edge = 1920
# JPEG quality (1-100) for web derivatives.
quality = 85

[processing]
# Maximum parallel workers. Omit for auto (one per CPU core); values above
# the core count are clamped down.
# max_processes = 4
"
    .to_string()
}
