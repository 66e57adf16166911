//! Pixel operations for building a circular icon.
//!
//! Each function takes an image by reference and returns a new buffer, so the
//! pipeline in [`compose`](crate::compose) reads as a straight sequence:
//!
//! ```text
//! square_crop → circle_mask → fit_to_mask → apply_mask → [add_border] → resize_to
//! ```
//!
//! All resampling uses Lanczos3.

use super::calculations::{centered_square_crop, in_inscribed_disk};
use super::params::BorderRatio;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

const OPAQUE: u8 = 255;
const TRANSPARENT: u8 = 0;
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Center-crop to a square whose side is the shorter edge.
pub fn square_crop(img: &RgbaImage) -> RgbaImage {
    let rect = centered_square_crop(img.width(), img.height());
    imageops::crop_imm(img, rect.x, rect.y, rect.side, rect.side).to_image()
}

/// Grayscale mask holding the disk inscribed in a `side × side` square.
pub fn circle_mask(side: u32) -> GrayImage {
    GrayImage::from_fn(side, side, |x, y| {
        if in_inscribed_disk(x, y, side) {
            Luma([OPAQUE])
        } else {
            Luma([TRANSPARENT])
        }
    })
}

/// Scale and center-crop `img` so it exactly matches the mask dimensions.
///
/// A no-op copy when the dimensions already agree, which is always the case
/// after [`square_crop`].
pub fn fit_to_mask(img: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    if img.dimensions() == mask.dimensions() {
        return img.clone();
    }
    DynamicImage::ImageRgba8(img.clone())
        .resize_to_fill(mask.width(), mask.height(), FilterType::Lanczos3)
        .to_rgba8()
}

/// Replace the alpha channel of `img` with the mask values.
///
/// Both buffers must have the same dimensions; see [`fit_to_mask`].
pub fn apply_mask(img: &RgbaImage, mask: &GrayImage) -> RgbaImage {
    debug_assert_eq!(img.dimensions(), mask.dimensions());
    let mut out = img.clone();
    for (pixel, alpha) in out.pixels_mut().zip(mask.pixels()) {
        pixel[3] = alpha[0];
    }
    out
}

/// Crop, mask and fit in one step: the borderless circular icon.
pub fn circular(img: &RgbaImage) -> RgbaImage {
    let square = square_crop(img);
    let mask = circle_mask(square.width());
    let fitted = fit_to_mask(&square, &mask);
    apply_mask(&fitted, &mask)
}

/// A transparent canvas with an opaque white inscribed disk.
pub fn white_disk(side: u32) -> RgbaImage {
    RgbaImage::from_fn(side, side, |x, y| {
        if in_inscribed_disk(x, y, side) {
            WHITE
        } else {
            Rgba([255, 255, 255, TRANSPARENT])
        }
    })
}

/// Shrink a circular icon and composite it centered on a white disk of the
/// original size, leaving a white ring of uniform width.
///
/// Returns the input unchanged when the ratio yields a zero-pixel border.
pub fn add_border(circle: &RgbaImage, ratio: BorderRatio) -> RgbaImage {
    let side = circle.width();
    let border = ratio.width_for(side);
    if border == 0 {
        return circle.clone();
    }

    let inner_side = ratio.inner_size_for(side);
    let inner = resample(circle, inner_side, inner_side);

    let mut canvas = white_disk(side);
    imageops::overlay(&mut canvas, &inner, border as i64, border as i64);
    canvas
}

/// Resample to the given dimensions, skipping the work when they already match.
pub fn resize_to(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    resample(img, width, height)
}

/// Lanczos3 resample in premultiplied alpha, so the color of fully
/// transparent pixels never bleeds into visible edges.
fn resample(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let resized = imageops::resize(&premultiply(img), width, height, FilterType::Lanczos3);
    unpremultiply(&resized)
}

fn premultiply(img: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        let a = pixel[3] as u32;
        for c in 0..3 {
            pixel[c] = ((pixel[c] as u32 * a + 127) / 255) as u8;
        }
    }
    out
}

fn unpremultiply(img: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        let a = pixel[3] as u32;
        if a == 0 {
            *pixel = Rgba([0, 0, 0, TRANSPARENT]);
            continue;
        }
        for c in 0..3 {
            pixel[c] = ((pixel[c] as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}
