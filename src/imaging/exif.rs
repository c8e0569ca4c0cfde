//! Minimal EXIF orientation reader for JPEG files.
//!
//! Phone cameras store photos unrotated and record the intended orientation
//! in EXIF tag 0x0112. Derivatives must be generated from the *displayed*
//! orientation, so every image is normalized before any resize.
//!
//! For JPEG: walks the marker segments looking for APP1 ("Exif\0\0"),
//! then reads Orientation from IFD0 of the embedded TIFF structure.
//! PNG and GIF carry no EXIF in practice and are returned as-is.
//!
//! Zero external dependencies — pure Rust, ~100 lines. Any parse failure
//! yields `None` (identity orientation); orientation is best-effort and
//! never an error.

use image::DynamicImage;

const EXIF_HEADER: &[u8] = b"Exif\0\0";
const ORIENTATION_TAG: u16 = 0x0112;

/// Extract the orientation value from in-memory JPEG bytes.
/// Returns `None` for non-JPEG bytes or on any parse failure.
pub fn orientation_from_jpeg(data: &[u8]) -> Option<u16> {
    let tiff = find_jpeg_app1_exif(data)?;
    orientation_from_tiff(tiff)
}

/// Find the TIFF payload inside a JPEG's APP1/Exif segment.
fn find_jpeg_app1_exif(data: &[u8]) -> Option<&[u8]> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];

        // SOS (0xDA) means image data starts — stop scanning
        if marker == 0xDA {
            break;
        }
        // Markers without length field
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }

        let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let seg_start = pos + 4;
        let seg_end = (pos + 2 + seg_len).min(data.len());

        if marker == 0xE1 {
            // A declared length shorter than the length field itself makes
            // the range reversed; get() rejects it instead of panicking
            let segment = data.get(seg_start..seg_end)?;
            if let Some(tiff) = segment.strip_prefix(EXIF_HEADER) {
                return Some(tiff);
            }
        }

        pos += 2 + seg_len;
    }
    None
}

/// Read Orientation (tag 0x0112, SHORT) from IFD0 of a TIFF structure.
fn orientation_from_tiff(data: &[u8]) -> Option<u16> {
    if data.len() < 8 {
        return None;
    }

    // Determine byte order
    let big_endian = match &data[0..2] {
        b"MM" => true,
        b"II" => false,
        _ => return None,
    };

    let read_u16 = |offset: usize| -> Option<u16> {
        let b = data.get(offset..offset + 2)?;
        Some(if big_endian {
            u16::from_be_bytes([b[0], b[1]])
        } else {
            u16::from_le_bytes([b[0], b[1]])
        })
    };

    let read_u32 = |offset: usize| -> Option<u32> {
        let b = data.get(offset..offset + 4)?;
        Some(if big_endian {
            u32::from_be_bytes([b[0], b[1], b[2], b[3]])
        } else {
            u32::from_le_bytes([b[0], b[1], b[2], b[3]])
        })
    };

    // Verify TIFF magic (42)
    if read_u16(2)? != 42 {
        return None;
    }

    let ifd_offset = read_u32(4)? as usize;
    let entry_count = read_u16(ifd_offset)? as usize;
    let entries_start = ifd_offset + 2;

    for i in 0..entry_count {
        let entry_offset = entries_start + i * 12;
        let tag = read_u16(entry_offset)?;

        if tag == ORIENTATION_TAG {
            // SHORT value stored inline in the first two value bytes
            let value = read_u16(entry_offset + 8)?;
            if (1..=8).contains(&value) {
                return Some(value);
            }
            return None;
        }
    }

    None
}

/// Apply an EXIF orientation to a decoded image.
///
/// Values per the EXIF spec: 1 = identity, 2 = mirror horizontal,
/// 3 = rotate 180, 4 = mirror vertical, 5 = mirror + rotate 270 CW,
/// 6 = rotate 90 CW, 7 = mirror + rotate 90 CW, 8 = rotate 270 CW.
pub fn apply_orientation(img: DynamicImage, orientation: u16) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    /// Build a minimal JPEG prefix containing one APP1/Exif segment with the
    /// given orientation, little-endian TIFF.
    fn jpeg_with_orientation(orientation: u16) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II");
        tiff.extend_from_slice(&42u16.to_le_bytes());
        tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 offset
        tiff.extend_from_slice(&1u16.to_le_bytes()); // one entry
        tiff.extend_from_slice(&ORIENTATION_TAG.to_le_bytes());
        tiff.extend_from_slice(&3u16.to_le_bytes()); // type SHORT
        tiff.extend_from_slice(&1u32.to_le_bytes()); // count
        tiff.extend_from_slice(&orientation.to_le_bytes());
        tiff.extend_from_slice(&0u16.to_le_bytes()); // value padding
        tiff.extend_from_slice(&0u32.to_le_bytes()); // next IFD

        let mut payload = Vec::new();
        payload.extend_from_slice(EXIF_HEADER);
        payload.extend_from_slice(&tiff);

        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        jpeg.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        jpeg.extend_from_slice(&payload);
        // SOS marker so the scanner terminates
        jpeg.extend_from_slice(&[0xFF, 0xDA]);
        jpeg
    }

    #[test]
    fn parses_orientation_little_endian() {
        let jpeg = jpeg_with_orientation(6);
        assert_eq!(orientation_from_jpeg(&jpeg), Some(6));
    }

    #[test]
    fn parses_all_valid_orientations() {
        for o in 1..=8 {
            assert_eq!(orientation_from_jpeg(&jpeg_with_orientation(o)), Some(o));
        }
    }

    #[test]
    fn rejects_out_of_range_orientation() {
        assert_eq!(orientation_from_jpeg(&jpeg_with_orientation(9)), None);
    }

    #[test]
    fn parses_orientation_big_endian() {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"MM");
        tiff.extend_from_slice(&42u16.to_be_bytes());
        tiff.extend_from_slice(&8u32.to_be_bytes());
        tiff.extend_from_slice(&1u16.to_be_bytes());
        tiff.extend_from_slice(&ORIENTATION_TAG.to_be_bytes());
        tiff.extend_from_slice(&3u16.to_be_bytes());
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&3u16.to_be_bytes()); // orientation 3
        tiff.extend_from_slice(&0u16.to_be_bytes());
        tiff.extend_from_slice(&0u32.to_be_bytes());

        let mut payload = Vec::new();
        payload.extend_from_slice(EXIF_HEADER);
        payload.extend_from_slice(&tiff);

        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        jpeg.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        jpeg.extend_from_slice(&payload);
        jpeg.extend_from_slice(&[0xFF, 0xDA]);

        assert_eq!(orientation_from_jpeg(&jpeg), Some(3));
    }

    #[test]
    fn no_exif_segment_returns_none() {
        // Bare JPEG with no APP segments
        assert_eq!(orientation_from_jpeg(&[0xFF, 0xD8, 0xFF, 0xDA]), None);
    }

    #[test]
    fn truncated_data_returns_none() {
        let jpeg = jpeg_with_orientation(6);
        assert_eq!(orientation_from_jpeg(&jpeg[..10]), None);
    }

    #[test]
    fn non_jpeg_bytes_return_none() {
        assert_eq!(orientation_from_jpeg(b"not a jpeg at all"), None);
    }

    #[test]
    fn app1_segment_shorter_than_length_field_returns_none() {
        // Declared length 1: payload would end before it starts
        assert_eq!(
            orientation_from_jpeg(&[0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x01, 0x00]),
            None
        );
    }

    #[test]
    fn app1_segment_with_zero_length_returns_none() {
        assert_eq!(
            orientation_from_jpeg(&[0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x00, 0xFF, 0xDA]),
            None
        );
    }

    // =========================================================================
    // apply_orientation tests
    // =========================================================================

    fn gradient(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 0])
        }))
    }

    #[test]
    fn identity_keeps_dimensions() {
        let img = apply_orientation(gradient(40, 30), 1);
        assert_eq!((img.width(), img.height()), (40, 30));
    }

    #[test]
    fn rotate_90_swaps_dimensions() {
        let img = apply_orientation(gradient(40, 30), 6);
        assert_eq!((img.width(), img.height()), (30, 40));
    }

    #[test]
    fn rotate_180_keeps_dimensions() {
        let img = apply_orientation(gradient(40, 30), 3);
        assert_eq!((img.width(), img.height()), (40, 30));
    }

    #[test]
    fn rotate_270_swaps_dimensions() {
        let img = apply_orientation(gradient(40, 30), 8);
        assert_eq!((img.width(), img.height()), (30, 40));
    }

    #[test]
    fn transpose_orientations_swap_dimensions() {
        for o in [5, 7] {
            let img = apply_orientation(gradient(40, 30), o);
            assert_eq!((img.width(), img.height()), (30, 40), "orientation {o}");
        }
    }

    #[test]
    fn mirror_keeps_dimensions() {
        for o in [2, 4] {
            let img = apply_orientation(gradient(40, 30), o);
            assert_eq!((img.width(), img.height()), (40, 30), "orientation {o}");
        }
    }

    #[test]
    fn rotate_90_moves_top_left_pixel() {
        // Mark the top-left pixel and check it lands top-right after 90 CW
        let mut base = RgbImage::from_pixel(4, 4, image::Rgb([0, 0, 0]));
        base.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        let rotated = apply_orientation(DynamicImage::ImageRgb8(base), 6);
        assert_eq!(rotated.to_rgb8().get_pixel(3, 0), &image::Rgb([255, 0, 0]));
    }
}
