//! Pure Rust icon backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |

use super::backend::{BackendError, IconBackend};
use image::codecs::png::PngEncoder;
use image::{ImageReader, RgbaImage};
use std::path::Path;

/// Whether `path` names a PNG file, judged by extension.
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Pure Rust backend using the `image` crate.
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

impl IconBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<RgbaImage, BackendError> {
        let decoded = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|source| BackendError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(decoded.to_rgba8())
    }

    fn save(&self, img: &RgbaImage, path: &Path) -> Result<(), BackendError> {
        if !is_png(path) {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            return Err(BackendError::UnsupportedFormat(ext));
        }

        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        img.write_with_encoder(PngEncoder::new(writer))
            .map_err(|source| BackendError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient_image, write_jpeg};
    use tempfile::TempDir;

    #[test]
    fn is_png_ignores_case() {
        assert!(is_png(Path::new("icon.png")));
        assert!(is_png(Path::new("ICON.PNG")));
        assert!(!is_png(Path::new("icon.jpg")));
        assert!(!is_png(Path::new("icon")));
    }

    #[test]
    fn save_then_load_preserves_pixels() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let img = gradient_image(24, 24);

        let backend = RustBackend::new();
        backend.save(&img, &path).unwrap();
        let loaded = backend.load(&path).unwrap();

        assert_eq!(loaded, img);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        std::fs::write(&path, b"stale bytes").unwrap();

        let backend = RustBackend::new();
        backend.save(&gradient_image(8, 8), &path).unwrap();
        assert_eq!(backend.load(&path).unwrap().dimensions(), (8, 8));
    }

    #[test]
    fn save_rejects_non_png_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.jpg");
        let err = RustBackend::new()
            .save(&gradient_image(4, 4), &path)
            .unwrap_err();
        assert!(matches!(err, BackendError::UnsupportedFormat(ref e) if e == "jpg"));
        assert!(!path.exists());
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope").join("out.png");
        let err = RustBackend::new()
            .save(&gradient_image(4, 4), &path)
            .unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }

    #[test]
    fn load_jpeg_as_rgba() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        write_jpeg(&path, 64, 48);

        let img = RustBackend::new().load(&path).unwrap();
        assert_eq!(img.dimensions(), (64, 48));
        assert!(img.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn load_sniffs_format_from_content() {
        let tmp = TempDir::new().unwrap();
        let png = tmp.path().join("logo.png");
        RustBackend::new().save(&gradient_image(12, 10), &png).unwrap();
        let renamed = tmp.path().join("logo.source");
        std::fs::rename(&png, &renamed).unwrap();

        let img = RustBackend::new().load(&renamed).unwrap();
        assert_eq!(img, gradient_image(12, 10));
    }

    #[test]
    fn load_garbage_is_decode_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fake.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = RustBackend::new().load(&path).unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }));
    }

    #[test]
    fn load_missing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = RustBackend::new()
            .load(&tmp.path().join("missing.png"))
            .unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }
}
