//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF) | `image` crate (pure Rust decoders) |
//! | EXIF orientation | custom `exif` parser (JPEG APP1 + TIFF IFD) |
//! | Resize | `image::DynamicImage::resize` with `Lanczos3` filter |
//! | Thumbnail padding | `image::imageops::overlay` onto transparent canvas |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at configured quality |
//!
//! ## Format handling
//!
//! Thumbnails are saved in the source's own format, so PNG and GIF keep
//! their transparent padding. JPEG has no alpha channel; the transparent
//! canvas flattens to black there.
//!
//! Web derivatives are always JPEG content regardless of input format, but
//! keep the source file name (and extension) so the viewer can reconstruct
//! paths from manifest entries alone.

use super::backend::{BackendError, ImageBackend};
use super::exif;
use super::params::{ThumbnailParams, WebParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::Path;

/// Extensions whose decoders are compiled in and known to work.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("gif", ImageFormat::Gif),
];

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn source_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    PHOTO_CANDIDATES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, fmt)| *fmt)
        .ok_or_else(|| {
            BackendError::ProcessingFailed(format!("Unsupported image format: {}", path.display()))
        })
}

/// Load, decode, and EXIF-normalize an image.
///
/// Orientation correction happens here so every downstream resize works on
/// the displayed geometry.
fn load_oriented(path: &Path) -> Result<DynamicImage, BackendError> {
    let format = source_format(path)?;
    let bytes = std::fs::read(path).map_err(BackendError::Io)?;

    let img = image::load_from_memory_with_format(&bytes, format).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })?;

    Ok(match exif::orientation_from_jpeg(&bytes) {
        Some(orientation) => exif::apply_orientation(img, orientation),
        None => img,
    })
}

/// Save a thumbnail in the source's own format.
///
/// PNG and GIF keep the RGBA canvas (transparent padding survives). JPEG is
/// flattened to RGB — the zeroed transparent pixels become black.
fn save_matching_format(
    canvas: RgbaImage,
    path: &Path,
    format: ImageFormat,
    quality: u32,
) -> Result<(), BackendError> {
    match format {
        ImageFormat::Jpeg => save_jpeg(&DynamicImage::ImageRgba8(canvas), path, quality),
        _ => DynamicImage::ImageRgba8(canvas)
            .save_with_format(path, format)
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to encode {}: {}",
                    path.display(),
                    e
                ))
            }),
    }
}

/// Encode as JPEG at the given quality, regardless of the path's extension.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let mut writer = std::io::BufWriter::new(file);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, quality as u8);

    // JPEG has no alpha — flatten first
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let format = source_format(&params.source)?;
        let img = load_oriented(&params.source)?;

        // Contain fit: scale (up or down) to touch the box on the longer
        // edge, then composite centered on a fully transparent canvas.
        let (scaled_w, scaled_h) = super::calculations::contain_dimensions(
            (img.width(), img.height()),
            params.box_size,
        );
        let scaled = img.resize_exact(scaled_w, scaled_h, FilterType::Lanczos3);

        let (x, y) =
            super::calculations::center_offset((scaled_w, scaled_h), params.box_size);

        let mut canvas = RgbaImage::from_pixel(
            params.box_size,
            params.box_size,
            image::Rgba([0, 0, 0, 0]),
        );
        image::imageops::overlay(&mut canvas, &scaled.to_rgba8(), x as i64, y as i64);

        save_matching_format(canvas, &params.output, format, params.quality.value())
    }

    fn web_image(&self, params: &WebParams) -> Result<(), BackendError> {
        let img = load_oriented(&params.source)?;

        let resized = match super::calculations::inside_dimensions(
            (img.width(), img.height()),
            params.max_edge,
        ) {
            Some((w, h)) => img.resize_exact(w, h, FilterType::Lanczos3),
            None => img,
        };

        save_jpeg(&resized, &params.output, params.quality.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use crate::test_helpers::{write_test_jpeg, write_test_png};

    #[test]
    fn thumbnail_canvas_is_exact_square() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        write_test_jpeg(&source, 800, 600);

        let output = tmp.path().join("thumb.jpg");
        let backend = RustBackend::new();
        backend
            .thumbnail(&ThumbnailParams {
                source,
                output: output.clone(),
                box_size: 200,
                quality: Quality::new(85),
            })
            .unwrap();

        let (w, h) = image::image_dimensions(&output).unwrap();
        assert_eq!((w, h), (200, 200));
    }

    #[test]
    fn thumbnail_portrait_source_also_square() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        write_test_png(&source, 300, 900);

        let output = tmp.path().join("thumb.png");
        let backend = RustBackend::new();
        backend
            .thumbnail(&ThumbnailParams {
                source,
                output: output.clone(),
                box_size: 200,
                quality: Quality::new(85),
            })
            .unwrap();

        let (w, h) = image::image_dimensions(&output).unwrap();
        assert_eq!((w, h), (200, 200));
    }

    #[test]
    fn thumbnail_png_padding_is_transparent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        // Wide source: vertical padding above and below
        write_test_png(&source, 800, 200);

        let output = tmp.path().join("thumb.png");
        let backend = RustBackend::new();
        backend
            .thumbnail(&ThumbnailParams {
                source,
                output: output.clone(),
                box_size: 200,
                quality: Quality::new(85),
            })
            .unwrap();

        let decoded = image::open(&output).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0, "corner should be transparent");
        assert_ne!(decoded.get_pixel(100, 100).0[3], 0, "center should be opaque");
    }

    #[test]
    fn thumbnail_upscales_tiny_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("tiny.png");
        write_test_png(&source, 40, 40);

        let output = tmp.path().join("thumb.png");
        let backend = RustBackend::new();
        backend
            .thumbnail(&ThumbnailParams {
                source,
                output: output.clone(),
                box_size: 200,
                quality: Quality::new(85),
            })
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (200, 200));
    }

    #[test]
    fn web_caps_longer_edge() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("big.jpg");
        write_test_jpeg(&source, 2400, 1600);

        let output = tmp.path().join("web.jpg");
        let backend = RustBackend::new();
        backend
            .web_image(&WebParams {
                source,
                output: output.clone(),
                max_edge: 1920,
                quality: Quality::new(85),
            })
            .unwrap();

        let (w, h) = image::image_dimensions(&output).unwrap();
        assert_eq!(w.max(h), 1920);
        assert_eq!((w, h), (1920, 1280));
    }

    #[test]
    fn web_never_upscales_small_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("small.jpg");
        write_test_jpeg(&source, 640, 480);

        let output = tmp.path().join("web.jpg");
        let backend = RustBackend::new();
        backend
            .web_image(&WebParams {
                source,
                output: output.clone(),
                max_edge: 1920,
                quality: Quality::new(85),
            })
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (640, 480));
    }

    #[test]
    fn web_png_source_reencoded_as_jpeg_content() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        write_test_png(&source, 500, 400);

        // Extension stays .png; the bytes are JPEG
        let web_dir = tmp.path().join("web");
        std::fs::create_dir_all(&web_dir).unwrap();
        let output = web_dir.join("photo.png");

        let backend = RustBackend::new();
        backend
            .web_image(&WebParams {
                source,
                output: output.clone(),
                max_edge: 1920,
                quality: Quality::new(85),
            })
            .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8], "JPEG magic expected");
    }

    #[test]
    fn corrupt_source_is_processing_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpg");
        std::fs::write(&source, b"definitely not a jpeg").unwrap();

        let backend = RustBackend::new();
        let result = backend.thumbnail(&ThumbnailParams {
            source,
            output: tmp.path().join("thumb.jpg"),
            box_size: 200,
            quality: Quality::new(85),
        });
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn unsupported_extension_errors() {
        let backend = RustBackend::new();
        let result = backend.thumbnail(&ThumbnailParams {
            source: "/some/file.bmp".into(),
            output: "/out/file.bmp".into(),
            box_size: 200,
            quality: Quality::new(85),
        });
        assert!(result.is_err());
    }
}
