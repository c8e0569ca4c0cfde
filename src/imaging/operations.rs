//! High-level derivative operations.
//!
//! These functions combine configuration with backend execution: they build
//! the parameter structs for the two derivative kinds and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::params::{Quality, ThumbnailParams, WebParams};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailSpec {
    /// Edge of the square bounding box.
    pub box_size: u32,
    pub quality: Quality,
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self {
            box_size: 200,
            quality: Quality::default(),
        }
    }
}

/// Configuration for web derivative generation.
#[derive(Debug, Clone, Copy)]
pub struct WebSpec {
    /// Cap on the longer edge; smaller sources are never upscaled.
    pub max_edge: u32,
    pub quality: Quality,
}

impl Default for WebSpec {
    fn default() -> Self {
        Self {
            max_edge: 1920,
            quality: Quality::default(),
        }
    }
}

/// Plan a thumbnail operation without executing it.
pub fn plan_thumbnail(source: &Path, output: &Path, spec: &ThumbnailSpec) -> ThumbnailParams {
    ThumbnailParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        box_size: spec.box_size,
        quality: spec.quality,
    }
}

/// Plan a web derivative operation without executing it.
pub fn plan_web_image(source: &Path, output: &Path, spec: &WebSpec) -> WebParams {
    WebParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        max_edge: spec.max_edge,
        quality: spec.quality,
    }
}

/// Create a thumbnail derivative.
pub fn create_thumbnail(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    spec: &ThumbnailSpec,
) -> Result<()> {
    backend.thumbnail(&plan_thumbnail(source, output, spec))
}

/// Create a web derivative.
pub fn create_web_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    spec: &WebSpec,
) -> Result<()> {
    backend.web_image(&plan_web_image(source, output, spec))
}
