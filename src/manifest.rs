//! The album manifest consumed by the gallery viewer.
//!
//! One flat JSON object mapping album name to its sorted list of *source*
//! file names:
//!
//! ```json
//! {
//!   "beach": ["B.png", "a.jpg"],
//!   "mountains": ["001.jpg", "002.jpg"]
//! }
//! ```
//!
//! The viewer reconstructs derivative paths by convention —
//! `{root}/{album}/thumbs/{file}` and `{root}/{album}/web/{file}` — so the
//! manifest never stores derivative paths itself. Written fully on every
//! run, never merged; a write failure is fatal to the run.
//!
//! Only files whose derivatives exist (freshly generated or skipped as
//! already present) are listed. Files that failed processing are omitted and
//! reported separately, so the viewer never links to a missing derivative.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Default manifest file name under the public root.
pub const MANIFEST_FILENAME: &str = "albums-manifest.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mapping from album name to its byte-order-sorted image file names.
///
/// `BTreeMap` keeps album keys sorted in the serialized output; the file
/// lists are sorted by the scanner before they get here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumManifest {
    pub albums: BTreeMap<String, Vec<String>>,
}

impl AlbumManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an album's file list. Replaces any previous entry.
    pub fn insert(&mut self, album: impl Into<String>, files: Vec<String>) {
        self.albums.insert(album.into(), files);
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Serialize as pretty-printed JSON and write to `path`.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a previously written manifest.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
