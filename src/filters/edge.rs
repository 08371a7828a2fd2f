//! Sobel edge detection.
//!
//! Every color channel is convolved separately with a horizontal and a
//! vertical gradient kernel and combined as `sqrt(gx² + gy²)`, truncated and
//! clamped. Output is therefore colored, not grayscale. Borders use edge
//! clamping like every other neighborhood filter.

use crate::buffer::{PixelBuffer, Rgb};
use super::core::{quantize, Kernel};

/// Pair of 3×3 Sobel gradient kernels, built once per filter instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Sobel {
    horizontal: Kernel,
    vertical: Kernel,
}

impl Sobel {
    pub fn new() -> Self {
        Sobel {
            horizontal: Kernel::from_square([
                [-1.0, 0.0, 1.0],
                [-2.0, 0.0, 2.0],
                [-1.0, 0.0, 1.0],
            ]),
            vertical: Kernel::from_square([
                [-1.0, -2.0, -1.0],
                [0.0, 0.0, 0.0],
                [1.0, 2.0, 1.0],
            ]),
        }
    }

    pub fn apply(&self, source: &PixelBuffer, x: usize, y: usize) -> Rgb {
        let gx = self.horizontal.weighted_sum(source, x, y);
        let gy = self.vertical.weighted_sum(source, x, y);
        let magnitude = |c: usize| quantize((gx[c] * gx[c] + gy[c] * gy[c]).sqrt());
        Rgb::new(magnitude(0), magnitude(1), magnitude(2))
    }
}

impl Default for Sobel {
    fn default() -> Self {
        Self::new()
    }
}
