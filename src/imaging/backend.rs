//! Image I/O backend trait and shared types.
//!
//! The [`IconBackend`] trait covers the two operations that touch the
//! filesystem: decoding the source and encoding each output. Everything in
//! between is pure pixel work in [`operations`](super::operations).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Trait for icon I/O backends.
pub trait IconBackend: Sync {
    /// Decode an image file into RGBA8.
    fn load(&self, path: &Path) -> Result<RgbaImage, BackendError>;

    /// Encode an image as PNG and write it, replacing any existing file.
    fn save(&self, img: &RgbaImage, path: &Path) -> Result<(), BackendError>;
}
