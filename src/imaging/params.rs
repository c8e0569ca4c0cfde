//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides which derivatives to create) and the
//! [`backend`](super::backend) (which does the actual pixel work). This
//! separation allows swapping backends (e.g. for testing with a mock)
//! without changing orchestration logic.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Parameters for a thumbnail operation (contain fit into a square box,
/// padded with transparent background).
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Edge of the square bounding box.
    pub box_size: u32,
    /// Used only when the output format is lossy (JPEG sources).
    pub quality: Quality,
}

/// Parameters for a web derivative (inside fit, JPEG re-encode).
#[derive(Debug, Clone, PartialEq)]
pub struct WebParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Cap on the longer edge. Smaller sources are never upscaled.
    pub max_edge: u32,
    pub quality: Quality,
}
