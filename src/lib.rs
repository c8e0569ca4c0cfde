//! # Album Press
//!
//! A derivative generator for static photo portfolios. Your filesystem is
//! the data source: subdirectories of the source root become albums, and
//! every raster image inside one gets a square thumbnail and a size-capped
//! web copy, plus a JSON manifest the gallery viewer loads at runtime.
//!
//! # Architecture: Three-Stage Run
//!
//! ```text
//! 1. Scan      public/images/  →  ScanManifest       (filesystem → structured data)
//! 2. Process   ScanManifest    →  thumbs/ + web/     (derivatives, in parallel)
//! 3. Manifest  ProcessReport   →  albums-manifest.json
//! ```
//!
//! This separation exists for two reasons:
//!
//! - **Testability**: scan and manifest are pure data transforms; process is
//!   exercised against a recording mock backend without encoding a pixel.
//! - **Failure isolation**: a broken image fails its own file, never the run.
//!   The manifest only ever lists files whose derivatives actually exist.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — discovers albums and their image files, sorted in byte order |
//! | [`process`] | Stage 2 — generates thumbnails and web derivatives over a rayon pool |
//! | [`manifest`] | Stage 3 — the `albums-manifest.json` the viewer consumes |
//! | [`config`] | Optional `config.toml` loading, validation, and stock config |
//! | [`imaging`] | Pure-Rust image operations: contain/inside fit, EXIF orientation, JPEG encode |
//! | [`output`] | Console output formatting for progress events and summaries |
//!
//! # Design Decisions
//!
//! ## Existence-Gated Idempotence
//!
//! A derivative is regenerated only when its output file is missing. No
//! timestamps, no checksums: the check is cheap, predictable, and immune to
//! clock skew from rsync or CI checkouts. Replacing a source image in place
//! requires deleting its derivatives (or `--force`).
//!
//! ## Derivatives Keep the Source File Name
//!
//! `beach/a.png` yields `beach/thumbs/a.png` and `beach/web/a.png`. The web
//! copy is JPEG *content* under the source extension — the viewer
//! reconstructs every derivative path from the manifest entry alone, so the
//! name must round-trip exactly. Thumbnails are encoded in the source's own
//! format so PNG and GIF keep their transparent padding.
//!
//! ## Pure-Rust Imaging (No ImageMagick, No External Tools)
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling) and a
//! small built-in EXIF orientation parser. No system dependencies: the
//! binary is fully self-contained and runs the same everywhere, which is
//! what a deploy script wants.

pub mod config;
pub mod imaging;
pub mod manifest;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
