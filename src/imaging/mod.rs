//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **EXIF orientation** | custom parser (JPEG APP1 + TIFF IFD) |
//! | **Thumbnail** | Lanczos3 contain fit + transparent canvas |
//! | **Web derivative** | Lanczos3 inside fit + JPEG encoder |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub(crate) mod exif;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{center_offset, contain_dimensions, inside_dimensions};
pub use operations::{ThumbnailSpec, WebSpec, create_thumbnail, create_web_image};
pub use params::{Quality, ThumbnailParams, WebParams};
pub use rust_backend::RustBackend;
