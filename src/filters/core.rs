//! Core utilities shared by the filter families.
//!
//! This module provides:
//! - Boundary clamping of sample coordinates
//! - Channel quantization (truncate toward zero, then clamp)
//! - The immutable convolution [`Kernel`] and its builders
//! - Per-pixel convolution against a [`PixelBuffer`]

use ndarray::Array2;
use tracing::debug;

use crate::buffer::{PixelBuffer, Rgb};
use crate::error::{FilterError, FilterResult};

/// Absorbs floating-point representation error before truncation, so a sum
/// that is an integer in exact arithmetic does not drop one step below it.
const TRUNC_GUARD: f64 = 1e-9;

/// Clamp `value` into `[min, max]`.
///
/// The lower bound is applied first, then the upper bound; when `min > max`
/// the result is `max`. Never panics.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let mut value = value;
    if value < min {
        value = min;
    }
    if value > max {
        value = max;
    }
    value
}

/// Clamp a signed coordinate onto `[0, len - 1]`.
#[inline]
pub fn clamp_index(value: i64, len: usize) -> usize {
    clamp(value, 0, len as i64 - 1) as usize
}

/// Truncate a channel value toward zero.
#[inline]
pub fn truncate(value: f64) -> i64 {
    if value >= 0.0 {
        (value + TRUNC_GUARD) as i64
    } else {
        (value - TRUNC_GUARD) as i64
    }
}

/// Truncate and clamp a channel value into 0-255.
#[inline]
pub fn quantize(value: f64) -> u8 {
    clamp(truncate(value), 0, 255) as u8
}

/// Sample `source` at a possibly out-of-range coordinate, clamped to the edge.
#[inline]
pub fn sample_clamped(source: &PixelBuffer, x: i64, y: i64) -> Rgb {
    source.get(
        clamp_index(x, source.width()),
        clamp_index(y, source.height()),
    )
}

/// Immutable convolution weight matrix with odd width and height.
///
/// Weights are stored as (height, width), addressed by `(dx, dy)` offsets
/// from the center. Radii are derived from the shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Array2<f64>,
}

impl Kernel {
    /// Wrap a weight matrix of shape (height, width); both sides must be odd.
    pub fn new(weights: Array2<f64>) -> FilterResult<Self> {
        let (height, width) = weights.dim();
        if width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::InvalidDimensions(format!(
                "kernel dimensions must be odd, got {}x{}",
                width, height
            )));
        }
        Ok(Kernel { weights })
    }

    /// Build from row-major weights.
    pub fn from_rows(width: usize, height: usize, data: Vec<f64>) -> FilterResult<Self> {
        if data.len() != width * height {
            return Err(FilterError::InvalidDimensions(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        let weights = Array2::from_shape_vec((height, width), data)
            .map_err(|e| FilterError::InvalidDimensions(e.to_string()))?;
        Self::new(weights)
    }

    /// Square kernel from literal rows; `N` must be odd.
    pub fn from_square<const N: usize>(rows: [[f64; N]; N]) -> Self {
        const { assert!(N % 2 == 1, "kernel side must be odd") };
        Kernel {
            weights: Array2::from_shape_fn((N, N), |(row, col)| rows[row][col]),
        }
    }

    /// Normalized Gaussian of the given radius.
    ///
    /// Weight at offset `(i, j)` is `exp(-(i² + j²) / sigma²)`, scaled so the
    /// weights sum to 1. Radius 0 yields the 1x1 identity.
    pub fn gaussian(radius: u32, sigma: f64) -> FilterResult<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(FilterError::InvalidParameter(format!(
                "gaussian sigma must be positive and finite, got {}",
                sigma
            )));
        }
        let r = radius as i64;
        let size = 2 * radius as usize + 1;
        let sigma_sq = sigma * sigma;

        let mut weights = Array2::<f64>::zeros((size, size));
        let mut norm = 0.0;
        for j in -r..=r {
            for i in -r..=r {
                let w = (-((i * i + j * j) as f64) / sigma_sq).exp();
                weights[[(j + r) as usize, (i + r) as usize]] = w;
                norm += w;
            }
        }
        weights.mapv_inplace(|w| w / norm);

        debug!(radius, sigma, size, "built gaussian kernel");
        Self::new(weights)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.weights.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.weights.dim().0
    }

    /// Horizontal and vertical radius.
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width() / 2, self.height() / 2)
    }

    /// Weight at offset `(dx, dy)` from the center.
    #[inline]
    pub fn at(&self, dx: i64, dy: i64) -> f64 {
        let (rx, ry) = self.radius();
        self.weights[[(dy + ry as i64) as usize, (dx + rx as i64) as usize]]
    }

    pub fn sum(&self) -> f64 {
        self.weights.sum()
    }

    /// Raw weighted sums `(r, g, b)` around `(x, y)` with edge clamping.
    pub fn weighted_sum(&self, source: &PixelBuffer, x: usize, y: usize) -> [f64; 3] {
        let (rx, ry) = self.radius();
        let (rx, ry) = (rx as i64, ry as i64);
        let (x, y) = (x as i64, y as i64);

        let mut acc = [0.0f64; 3];
        for dy in -ry..=ry {
            for dx in -rx..=rx {
                let w = self.at(dx, dy);
                let px = sample_clamped(source, x + dx, y + dy);
                for (sum, c) in acc.iter_mut().zip(px.channels()) {
                    *sum += c as f64 * w;
                }
            }
        }
        acc
    }

    /// Convolved pixel at `(x, y)`, each channel truncated and clamped.
    pub fn convolve_at(&self, source: &PixelBuffer, x: usize, y: usize) -> Rgb {
        let [r, g, b] = self.weighted_sum(source, x, y);
        Rgb::new(quantize(r), quantize(g), quantize(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp_in_range_unchanged() {
        for v in -3..=3 {
            assert_eq!(clamp(v, -3, 3), v);
        }
    }

    #[test]
    fn test_clamp_bounds() {
        for v in -50i64..50 {
            for (lo, hi) in [(-10, 10), (0, 0), (5, 40)] {
                let c = clamp(v, lo, hi);
                assert!(c >= lo && c <= hi);
            }
        }
        assert_eq!(clamp(300, 0, 255), 255);
        assert_eq!(clamp(-1, 0, 255), 0);
    }

    #[test]
    fn test_clamp_inverted_range_takes_max() {
        assert_eq!(clamp(-1, 1, 0), 0);
        assert_eq!(clamp(5, 1, 0), 0);
    }

    #[test]
    fn test_truncate_toward_zero() {
        assert_eq!(truncate(137.5), 137);
        assert_eq!(truncate(-2.7), -2);
        assert_eq!(truncate(99.999_999_999_999_99), 100);
        assert_eq!(quantize(-40.0), 0);
        assert_eq!(quantize(1e6), 255);
    }

    #[test]
    fn test_even_kernel_rejected() {
        let err = Kernel::new(Array2::<f64>::zeros((3, 4))).unwrap_err();
        assert!(matches!(err, FilterError::InvalidDimensions(_)));
        assert!(Kernel::from_rows(3, 3, vec![0.0; 8]).is_err());
    }

    #[test]
    fn test_gaussian_kernel_normalized() {
        let k = Kernel::gaussian(3, 2.0).unwrap();
        assert_eq!((k.width(), k.height()), (7, 7));
        assert_eq!(k.radius(), (3, 3));
        assert_relative_eq!(k.sum(), 1.0, epsilon = 1e-12);
        assert!(k.at(0, 0) > k.at(1, 0));
        assert_relative_eq!(k.at(2, -1), k.at(-1, 2), epsilon = 1e-15);
    }

    #[test]
    fn test_gaussian_radius_zero_is_identity() {
        let k = Kernel::gaussian(0, 1.5).unwrap();
        assert_eq!((k.width(), k.height()), (1, 1));
        assert_relative_eq!(k.at(0, 0), 1.0);
    }

    #[test]
    fn test_gaussian_rejects_bad_sigma() {
        assert!(matches!(
            Kernel::gaussian(3, 0.0),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(Kernel::gaussian(3, f64::NAN).is_err());
    }

    #[test]
    fn test_from_square_row_major() {
        let k = Kernel::from_square([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_relative_eq!(k.at(1, -1), 3.0);
        assert_relative_eq!(k.at(-1, 1), 7.0);
    }

    #[test]
    fn test_convolve_edge_clamps() {
        let src = PixelBuffer::from_fn(3, 1, |x, _| Rgb::new(x as u8 * 10, 0, 0)).unwrap();
        let k = Kernel::from_rows(3, 1, vec![1.0, 0.0, 0.0]).unwrap();
        // Left neighbor of column 0 is column 0 itself.
        assert_eq!(k.convolve_at(&src, 0, 0).r, 0);
        assert_eq!(k.convolve_at(&src, 2, 0).r, 10);
    }
}
