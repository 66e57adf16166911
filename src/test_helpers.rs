//! Shared test utilities: synthetic source images and fixture files.
//!
//! Images are generated in code rather than checked in, so each test states
//! the exact dimensions it cares about.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// A single-color image.
pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

/// An opaque image with a smooth gradient, so crops and resizes are
/// distinguishable from each other.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    })
}

/// Write an opaque RGB JPEG, the typical camera-photo input.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}
