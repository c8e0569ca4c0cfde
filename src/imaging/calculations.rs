//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the scaled image dimensions for a contain fit into a square box.
///
/// The image is scaled to fit entirely within `box_size`×`box_size` while
/// preserving aspect ratio. Smaller images are scaled up so that the longer
/// edge reaches the box; the remaining space is padding, supplied by the
/// caller. At least one returned dimension equals `box_size`.
///
/// # Examples
/// ```
/// # use album_press::imaging::contain_dimensions;
/// // 4:3 landscape into a 200 box → 200x150
/// assert_eq!(contain_dimensions((800, 600), 200), (200, 150));
///
/// // small square upscaled to fill the box
/// assert_eq!(contain_dimensions((50, 50), 200), (200, 200));
/// ```
pub fn contain_dimensions(source: (u32, u32), box_size: u32) -> (u32, u32) {
    let (src_w, src_h) = source;

    if src_w >= src_h {
        let w = box_size;
        let h = ((box_size as f64 * src_h as f64 / src_w as f64).round() as u32).max(1);
        (w, h)
    } else {
        let h = box_size;
        let w = ((box_size as f64 * src_w as f64 / src_h as f64).round() as u32).max(1);
        (w, h)
    }
}

/// Calculate the pixel offset that centers a scaled image inside a square box.
///
/// Returns `(x, y)` of the top-left corner. Both components are zero when the
/// corresponding edge fills the box.
pub fn center_offset(scaled: (u32, u32), box_size: u32) -> (u32, u32) {
    let (w, h) = scaled;
    (
        box_size.saturating_sub(w) / 2,
        box_size.saturating_sub(h) / 2,
    )
}

/// Calculate dimensions for an inside fit: cap the longer edge at `max_edge`,
/// preserving aspect ratio, never upscaling.
///
/// Returns `None` when the source already fits — the caller should keep the
/// original pixel dimensions (re-encoding may still happen).
pub fn inside_dimensions(source: (u32, u32), max_edge: u32) -> Option<(u32, u32)> {
    let (src_w, src_h) = source;
    let longer = src_w.max(src_h);

    if longer <= max_edge {
        return None;
    }

    let ratio = max_edge as f64 / longer as f64;
    if src_w >= src_h {
        Some((max_edge, ((src_h as f64 * ratio).round() as u32).max(1)))
    } else {
        Some((((src_w as f64 * ratio).round() as u32).max(1), max_edge))
    }
}
