//! Image processing — pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` |
//! | **Crop / mask / composite** | `imageops::crop_imm`, per-pixel alpha, `imageops::overlay` |
//! | **Resize** | Lanczos3 |
//! | **Encode** | PNG |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop and border geometry (unit testable)
//! - **Parameters**: Validated values describing the icon to build
//! - **Operations**: Pixel transforms on in-memory buffers
//! - **Backend**: [`IconBackend`] trait + [`RustBackend`] for file I/O

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, IconBackend};
pub use calculations::{CropRect, border_width, centered_square_crop, inner_size};
pub use params::{BorderRatio, DEFAULT_MAX_SIDE, InvalidBorderRatio, Resolution};
pub use rust_backend::RustBackend;
