//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend
//! must support: thumbnail and web_image.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, zero
//! external dependencies. Everything is statically linked into the binary.

use super::params::{ThumbnailParams, WebParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
///
/// Every backend must implement both operations so the process stage
/// is backend-agnostic — orchestration logic is tested against a recording
/// mock without encoding a single pixel.
pub trait ImageBackend: Sync {
    /// Generate a thumbnail: contain fit into a square box, transparent padding.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;

    /// Generate a web derivative: inside fit, JPEG re-encode.
    fn web_image(&self, params: &WebParams) -> Result<(), BackendError>;
}
