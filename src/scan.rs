//! Filesystem scanning: album discovery and image enumeration.
//!
//! Stage 1 of the album-press run. The filesystem is the data source:
//! every subdirectory of the source root is an album, and every raster
//! image file directly inside it belongs to that album.
//!
//! ## Directory Structure
//!
//! ```text
//! public/images/                   # Source root
//! ├── beach/                       # Album
//! │   ├── B.png
//! │   ├── a.jpg
//! │   ├── thumbs/                  # Generated — ignored by the scanner
//! │   └── web/                     # Generated — ignored by the scanner
//! └── mountains/
//!     ├── 001.jpg
//!     └── 002.jpg
//! ```
//!
//! ## Rules
//!
//! - Albums are subdirectories of the root; loose files in the root are ignored.
//! - Images are files with extension `.jpg/.jpeg/.png/.gif`, case-insensitive.
//! - Hidden entries (leading `.`) and the `thumbs`/`web` output directories
//!   are skipped.
//! - File lists are sorted ascending in byte order — case-sensitive, so
//!   `B.png` sorts before `a.jpg`. The manifest and the viewer rely on this
//!   exact ordering.
//! - An unreadable root or album directory is fatal; an empty album is not.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read source directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of scanning the source tree.
#[derive(Debug)]
pub struct ScanManifest {
    /// Albums sorted by name (byte order).
    pub albums: Vec<AlbumDir>,
}

impl ScanManifest {
    /// Total number of images across all albums.
    pub fn image_count(&self) -> usize {
        self.albums.iter().map(|a| a.files.len()).sum()
    }
}

/// One album directory and its image files.
#[derive(Debug)]
pub struct AlbumDir {
    /// Directory name — the album's identity, case-sensitive.
    pub name: String,
    /// Absolute path of the album directory.
    pub dir: PathBuf,
    /// Image file names, sorted ascending in byte order.
    pub files: Vec<String>,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Scan the source root into a [`ScanManifest`].
pub fn scan(root: &Path) -> Result<ScanManifest, ScanError> {
    let entries = read_dir_sorted(root)?;

    let mut albums = Vec::new();
    for path in entries {
        if !path.is_dir() {
            continue;
        }
        let Some(name) = file_name(&path) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let files = collect_album_files(&path)?;
        albums.push(AlbumDir {
            name,
            dir: path,
            files,
        });
    }

    Ok(ScanManifest { albums })
}

/// List an album's image files, sorted ascending in byte order.
fn collect_album_files(album_dir: &Path) -> Result<Vec<String>, ScanError> {
    let mut files: Vec<String> = read_dir_sorted(album_dir)?
        .into_iter()
        .filter(|p| is_image(p))
        .filter_map(|p| file_name(&p))
        .filter(|name| !name.starts_with('.'))
        .collect();

    files.sort();
    Ok(files)
}

fn read_dir_sorted(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)
        .map_err(|source| ScanError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();

    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_string())
}

fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}
