//! Pure calculation functions for icon geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// A square region of the source image, in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Calculate the centered square crop for an image.
///
/// The side is the shorter edge; the offset on the longer axis is truncated
/// when the difference is odd.
///
/// ```
/// # use roundel::imaging::centered_square_crop;
/// let rect = centered_square_crop(1024, 768);
/// assert_eq!((rect.x, rect.y, rect.side), (128, 0, 768));
/// ```
pub fn centered_square_crop(width: u32, height: u32) -> CropRect {
    let side = width.min(height);
    CropRect {
        x: (width - side) / 2,
        y: (height - side) / 2,
        side,
    }
}

/// Border thickness in pixels: `floor(side × ratio)`.
pub fn border_width(side: u32, ratio: f64) -> u32 {
    (side as f64 * ratio).floor() as u32
}

/// Side length of the shrunken image that sits inside the border ring.
pub fn inner_size(side: u32, border_width: u32) -> u32 {
    side.saturating_sub(border_width * 2)
}

/// Whether pixel `(x, y)` belongs to the disk inscribed in a `side × side` square.
///
/// The pixel is tested at its center, so the disk touches all four edges
/// without spilling past them.
pub fn in_inscribed_disk(x: u32, y: u32, side: u32) -> bool {
    let radius = side as f64 / 2.0;
    let dx = x as f64 + 0.5 - radius;
    let dy = y as f64 + 0.5 - radius;
    dx * dx + dy * dy <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_landscape_centers_horizontally() {
        assert_eq!(
            centered_square_crop(1024, 768),
            CropRect {
                x: 128,
                y: 0,
                side: 768
            }
        );
    }

    #[test]
    fn crop_portrait_centers_vertically() {
        assert_eq!(
            centered_square_crop(600, 1000),
            CropRect {
                x: 0,
                y: 200,
                side: 600
            }
        );
    }

    #[test]
    fn crop_square_is_identity() {
        assert_eq!(
            centered_square_crop(512, 512),
            CropRect {
                x: 0,
                y: 0,
                side: 512
            }
        );
    }

    #[test]
    fn crop_odd_difference_truncates() {
        // 101 - 100 = 1, half of which truncates to 0
        let rect = centered_square_crop(101, 100);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.side, 100);

        let rect = centered_square_crop(100, 103);
        assert_eq!(rect.y, 1);
    }

    #[test]
    fn crop_side_is_always_shorter_edge() {
        for (w, h) in [(1, 1), (3, 7), (640, 480), (17, 4096)] {
            let rect = centered_square_crop(w, h);
            assert_eq!(rect.side, w.min(h));
            assert!(rect.x + rect.side <= w);
            assert!(rect.y + rect.side <= h);
        }
    }

    #[test]
    fn border_width_floors() {
        assert_eq!(border_width(768, 0.05), 38); // 38.4
        assert_eq!(border_width(100, 0.05), 5);
        assert_eq!(border_width(10, 0.05), 0);
        assert_eq!(border_width(768, 0.0), 0);
    }

    #[test]
    fn inner_size_is_positive_below_half() {
        for side in [1u32, 2, 3, 10, 99, 768, 1000] {
            for ratio in [0.0, 0.05, 0.25, 0.4, 0.49, 0.4999] {
                let bw = border_width(side, ratio);
                let inner = inner_size(side, bw);
                assert_eq!(inner, side - 2 * bw);
                assert!(inner > 0, "side={side} ratio={ratio}");
            }
        }
    }

    #[test]
    fn disk_excludes_corners_includes_center() {
        let side = 100;
        assert!(in_inscribed_disk(50, 50, side));
        assert!(!in_inscribed_disk(0, 0, side));
        assert!(!in_inscribed_disk(99, 0, side));
        assert!(!in_inscribed_disk(0, 99, side));
        assert!(!in_inscribed_disk(99, 99, side));
    }

    #[test]
    fn disk_touches_edge_midpoints() {
        let side = 100;
        assert!(in_inscribed_disk(0, 50, side));
        assert!(in_inscribed_disk(99, 50, side));
        assert!(in_inscribed_disk(50, 0, side));
        assert!(in_inscribed_disk(50, 99, side));
    }

    #[test]
    fn disk_area_approximates_pi_r_squared() {
        for side in [64u32, 257, 768] {
            let count = (0..side)
                .flat_map(|y| (0..side).map(move |x| (x, y)))
                .filter(|&(x, y)| in_inscribed_disk(x, y, side))
                .count() as f64;
            let r = side as f64 / 2.0;
            let expected = std::f64::consts::PI * r * r;
            // Discretization error is on the order of the circumference
            assert!(
                (count - expected).abs() < 2.0 * std::f64::consts::PI * r,
                "side={side} count={count} expected={expected}"
            );
        }
    }
}
