//! Blur kernels: uniform box blur and Gaussian.
//!
//! Both are applied through the generic convolution in
//! [`Kernel::convolve_at`], with edge pixels clamped.

use super::core::Kernel;
use crate::error::FilterResult;

/// Default Gaussian radius (7x7 kernel).
pub const GAUSSIAN_RADIUS: u32 = 3;
/// Default Gaussian sigma.
pub const GAUSSIAN_SIGMA: f64 = 2.0;

/// 3×3 kernel, every weight 1/9.
pub fn blur_kernel() -> Kernel {
    Kernel::from_square([[1.0 / 9.0; 3]; 3])
}

/// Normalized Gaussian, `exp(-(i²+j²)/sigma²)` at offset `(i, j)`.
pub fn gaussian_kernel(radius: u32, sigma: f64) -> FilterResult<Kernel> {
    Kernel::gaussian(radius, sigma)
}
