//! Parameter types for icon operations.
//!
//! These types describe *what* to produce, not *how*. They are validated on
//! construction so the pixel operations never see an out-of-range value.
//!
//! ## Types
//!
//! - [`BorderRatio`] — Border thickness as a fraction of the square side, in `[0, 0.5)`.
//! - [`Resolution`] — Output size rule for a target: an exact size or a cap on the side.

use super::calculations::{border_width, inner_size};
use thiserror::Error;

/// Default cap on the side of targets that do not ask for an exact size.
pub const DEFAULT_MAX_SIDE: u32 = 512;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("border ratio must be in [0, 0.5), got {0}")]
pub struct InvalidBorderRatio(pub f64);

/// Border thickness as a fraction of the square side length.
///
/// Values at or above 0.5 would leave no room for the inner image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderRatio(f64);

impl BorderRatio {
    pub fn new(value: f64) -> Result<Self, InvalidBorderRatio> {
        if (0.0..0.5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidBorderRatio(value))
        }
    }

    /// Border width in pixels for a square of the given side.
    pub fn width_for(self, side: u32) -> u32 {
        border_width(side, self.0)
    }

    /// Side of the inner image for a square of the given side.
    pub fn inner_size_for(self, side: u32) -> u32 {
        inner_size(side, self.width_for(side))
    }
}

/// How large an output target should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Resample to exactly this size, up or down.
    Exact { width: u32, height: u32 },
    /// Keep the image's side, shrinking it to at most this many pixels.
    AtMost(u32),
}

impl Resolution {
    pub fn square(side: u32) -> Self {
        Self::Exact {
            width: side,
            height: side,
        }
    }

    /// Resolve to concrete dimensions for a square image of side `side`.
    pub fn dimensions_for(self, side: u32) -> (u32, u32) {
        match self {
            Self::Exact { width, height } => (width, height),
            Self::AtMost(max) => {
                let s = side.min(max);
                (s, s)
            }
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::AtMost(DEFAULT_MAX_SIDE)
    }
}
