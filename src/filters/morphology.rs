//! Morphology filters: Dilate, Erode, and the Opening/Closing composites.
//!
//! Both single-pass filters visit the 3×3 neighborhood (edges clamped),
//! column offset outer and row offset inner, and keep one whole color.
//!
//! Unlike textbook grayscale morphology this is not a per-channel max/min:
//! the running color is replaced by a neighbor as soon as *any* one of its
//! channels compares better, so the result depends on the visiting order and
//! is always one of the input colors.

use crate::buffer::{PixelBuffer, Rgb};
use super::core::sample_clamped;

// ============================================================================
// Dilate
// ============================================================================

/// Brightest-ish neighbor of `(x, y)`, starting from black.
pub fn dilate_at(source: &PixelBuffer, x: usize, y: usize) -> Rgb {
    let mut best = Rgb::BLACK;
    for dx in -1..=1i64 {
        for dy in -1..=1i64 {
            let near = sample_clamped(source, x as i64 + dx, y as i64 + dy);
            if near.r > best.r || near.g > best.g || near.b > best.b {
                best = near;
            }
        }
    }
    best
}

// ============================================================================
// Erode
// ============================================================================

/// Darkest-ish neighbor of `(x, y)`, starting from white.
pub fn erode_at(source: &PixelBuffer, x: usize, y: usize) -> Rgb {
    let mut best = Rgb::WHITE;
    for dx in -1..=1i64 {
        for dy in -1..=1i64 {
            let near = sample_clamped(source, x as i64 + dx, y as i64 + dy);
            if near.r < best.r || near.g < best.g || near.b < best.b {
                best = near;
            }
        }
    }
    best
}

// ============================================================================
// Composites
// ============================================================================

/// Two-pass morphological operation.
///
/// Each pass is a full scan; the second reads the complete output of the
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Erosion, then dilation.
    Opening,
    /// Dilation, then erosion.
    Closing,
}

impl Composite {
    /// The two passes, in execution order.
    pub fn passes(&self) -> [super::Filter; 2] {
        use super::Filter;
        match self {
            Composite::Opening => [Filter::Erosion, Filter::Dilation],
            Composite::Closing => [Filter::Dilation, Filter::Erosion],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilate_grows_bright() {
        let mut src = PixelBuffer::filled(5, 5, Rgb::new(10, 10, 10)).unwrap();
        src.set(2, 2, Rgb::new(200, 0, 0));

        assert_eq!(dilate_at(&src, 1, 2), Rgb::new(200, 0, 0));
        assert_eq!(dilate_at(&src, 3, 3), Rgb::new(200, 0, 0));
        assert_eq!(dilate_at(&src, 0, 0), Rgb::new(10, 10, 10));
    }

    #[test]
    fn test_erode_shrinks_bright() {
        let mut src = PixelBuffer::filled(5, 5, Rgb::new(200, 200, 200)).unwrap();
        src.set(2, 2, Rgb::new(0, 0, 0));

        assert_eq!(erode_at(&src, 2, 1), Rgb::BLACK);
        assert_eq!(erode_at(&src, 4, 4), Rgb::new(200, 200, 200));
    }

    #[test]
    fn test_dilate_replaces_whole_color_on_any_channel() {
        // Visit order at (1, 0): (0,0) (0,0) (0,1) (1,0) (1,0) (1,1) (2,0) (2,0) (2,1)
        let src = PixelBuffer::from_fn(3, 2, |x, y| match (x, y) {
            (0, 0) => Rgb::new(100, 0, 0),
            (2, 1) => Rgb::new(0, 0, 1),
            _ => Rgb::BLACK,
        })
        .unwrap();
        // The last visited neighbor wins on blue alone, dropping the red one.
        assert_eq!(dilate_at(&src, 1, 0), Rgb::new(0, 0, 1));
    }

    #[test]
    fn test_erode_replaces_whole_color_on_any_channel() {
        let src = PixelBuffer::from_fn(3, 2, |x, y| match (x, y) {
            (0, 0) => Rgb::new(0, 255, 255),
            (2, 1) => Rgb::new(255, 255, 254),
            _ => Rgb::WHITE,
        })
        .unwrap();
        assert_eq!(erode_at(&src, 1, 0), Rgb::new(255, 255, 254));
    }

    #[test]
    fn test_constant_image_unchanged() {
        let src = PixelBuffer::filled(4, 3, Rgb::new(7, 130, 250)).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(dilate_at(&src, x, y), Rgb::new(7, 130, 250));
                assert_eq!(erode_at(&src, x, y), Rgb::new(7, 130, 250));
            }
        }
    }

    #[test]
    fn test_composite_pass_order() {
        use crate::filters::Filter;
        assert_eq!(Composite::Opening.passes(), [Filter::Erosion, Filter::Dilation]);
        assert_eq!(Composite::Closing.passes(), [Filter::Dilation, Filter::Erosion]);
    }
}
