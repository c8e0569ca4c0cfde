//! Stage 2: derivative generation.
//!
//! Walks the scanned albums and produces, for every image, a square
//! thumbnail under `{album}/thumbs/` and a size-capped web copy under
//! `{album}/web/`. Work is distributed over a rayon pool; progress events
//! stream over an mpsc channel so the caller can print them from a single
//! thread.
//!
//! ## Skip policy
//!
//! A derivative is regenerated only when its output file is missing (or
//! `force` is set). The check is pure existence — no timestamps, no
//! checksums — so touching a source image does not invalidate anything;
//! delete the derivative (or pass `--force`) to rebuild it.
//!
//! ## Failure policy
//!
//! A file that fails to decode or encode is logged and dropped from the
//! manifest; the run continues and still exits successfully. Only being
//! unable to create an output directory is fatal.

use crate::config::GeneratorConfig;
use crate::imaging::{
    ImageBackend, RustBackend, ThumbnailSpec, WebSpec, create_thumbnail, create_web_image,
};
use crate::manifest::AlbumManifest;
use crate::scan::{AlbumDir, ScanManifest};
use rayon::prelude::*;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Cannot create output directory {path}: {source}")]
    CreateDir {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// What happened to one derivative of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    Skipped,
}

/// Progress events emitted while processing. Sent over a channel so a
/// single printer thread owns stdout.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    AlbumStarted { album: String, images: usize },
    ImageDone {
        album: String,
        file: String,
        thumbnail: Outcome,
        web: Outcome,
    },
    ImageFailed {
        album: String,
        file: String,
        error: String,
    },
}

/// One image that could not be processed.
#[derive(Debug, Clone)]
pub struct FailedFile {
    pub album: String,
    pub file: String,
    pub error: String,
}

/// Result of a full processing run.
#[derive(Debug, Default)]
pub struct ProcessReport {
    /// Album manifest covering every file whose derivatives exist.
    pub manifest: AlbumManifest,
    /// Derivatives written this run.
    pub generated: usize,
    /// Derivatives left untouched because they already existed.
    pub skipped: usize,
    /// Files dropped from the manifest.
    pub failures: Vec<FailedFile>,
}

impl ProcessReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Per-file result inside one album. Ok carries the derivative outcomes.
type FileResult = Result<(String, Outcome, Outcome), (String, String)>;

/// Process all albums with the production backend.
pub fn process(
    scan: &ScanManifest,
    config: &GeneratorConfig,
    force: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessReport, ProcessError> {
    process_with_backend(&RustBackend, scan, config, force, events)
}

/// Process all albums with an explicit backend (tests inject a mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    scan: &ScanManifest,
    config: &GeneratorConfig,
    force: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessReport, ProcessError> {
    let thumb_spec = ThumbnailSpec {
        box_size: config.thumbnails.size,
        quality: crate::imaging::Quality::new(config.thumbnails.quality),
    };
    let web_spec = WebSpec {
        max_edge: config.web.max_edge,
        quality: crate::imaging::Quality::new(config.web.quality),
    };

    let mut report = ProcessReport::default();

    for album in &scan.albums {
        if let Some(tx) = &events {
            let _ = tx.send(ProcessEvent::AlbumStarted {
                album: album.name.clone(),
                images: album.files.len(),
            });
        }

        let thumbs_dir = album.dir.join("thumbs");
        let web_dir = album.dir.join("web");
        create_dir(&thumbs_dir)?;
        create_dir(&web_dir)?;

        // par_iter preserves input order on collect, so the manifest keeps
        // the scanner's byte-order sorting.
        let results: Vec<FileResult> = album
            .files
            .par_iter()
            .map_with(events.clone(), |tx, file| {
                let result = process_file(
                    backend, album, file, &thumbs_dir, &web_dir, &thumb_spec, &web_spec, force,
                );
                if let Some(tx) = tx {
                    let _ = tx.send(match &result {
                        Ok((file, thumbnail, web)) => ProcessEvent::ImageDone {
                            album: album.name.clone(),
                            file: file.clone(),
                            thumbnail: *thumbnail,
                            web: *web,
                        },
                        Err((file, error)) => ProcessEvent::ImageFailed {
                            album: album.name.clone(),
                            file: file.clone(),
                            error: error.clone(),
                        },
                    });
                }
                result
            })
            .collect();

        let mut listed = Vec::new();
        for result in results {
            match result {
                Ok((file, thumbnail, web)) => {
                    for outcome in [thumbnail, web] {
                        match outcome {
                            Outcome::Generated => report.generated += 1,
                            Outcome::Skipped => report.skipped += 1,
                        }
                    }
                    listed.push(file);
                }
                Err((file, error)) => {
                    report.failures.push(FailedFile {
                        album: album.name.clone(),
                        file,
                        error,
                    });
                }
            }
        }
        // Empty albums keep their (empty) manifest entry.
        report.manifest.insert(album.name.clone(), listed);
    }

    Ok(report)
}

/// Generate both derivatives for one image. Each derivative is checked
/// independently, so a run can backfill just the missing one.
#[allow(clippy::too_many_arguments)]
fn process_file(
    backend: &impl ImageBackend,
    album: &AlbumDir,
    file: &str,
    thumbs_dir: &Path,
    web_dir: &Path,
    thumb_spec: &ThumbnailSpec,
    web_spec: &WebSpec,
    force: bool,
) -> FileResult {
    let source = album.dir.join(file);
    let thumb_out = thumbs_dir.join(file);
    let web_out = web_dir.join(file);

    let thumbnail = if thumb_out.exists() && !force {
        Outcome::Skipped
    } else {
        create_thumbnail(backend, &source, &thumb_out, thumb_spec)
            .map_err(|e| (file.to_string(), e.to_string()))?;
        Outcome::Generated
    };

    let web = if web_out.exists() && !force {
        Outcome::Skipped
    } else {
        create_web_image(backend, &source, &web_out, web_spec)
            .map_err(|e| (file.to_string(), e.to_string()))?;
        Outcome::Generated
    };

    Ok((file.to_string(), thumbnail, web))
}

fn create_dir(path: &Path) -> Result<(), ProcessError> {
    std::fs::create_dir_all(path).map_err(|source| ProcessError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
