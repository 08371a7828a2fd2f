//! Sharpen and motion blur kernels.

use super::core::Kernel;

/// 3×3 sharpening kernel, center 9 and -1 around it.
pub fn harshness_kernel() -> Kernel {
    Kernel::from_square([
        [-1.0, -1.0, -1.0],
        [-1.0, 9.0, -1.0],
        [-1.0, -1.0, -1.0],
    ])
}

/// 5×5 kernel with 1/5 on the main diagonal.
///
/// Smears along the top-left to bottom-right direction.
pub fn motion_blur_kernel() -> Kernel {
    const W: f64 = 1.0 / 5.0;
    Kernel::from_square([
        [W, 0.0, 0.0, 0.0, 0.0],
        [0.0, W, 0.0, 0.0, 0.0],
        [0.0, 0.0, W, 0.0, 0.0],
        [0.0, 0.0, 0.0, W, 0.0],
        [0.0, 0.0, 0.0, 0.0, W],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{PixelBuffer, Rgb};
    use approx::assert_relative_eq;

    #[test]
    fn test_harshness_flat_region_unchanged() {
        let k = harshness_kernel();
        assert_relative_eq!(k.sum(), 1.0);
        let src = PixelBuffer::filled(3, 3, Rgb::new(40, 41, 42)).unwrap();
        assert_eq!(k.convolve_at(&src, 1, 1), Rgb::new(40, 41, 42));
    }

    #[test]
    fn test_harshness_boosts_contrast() {
        let mut src = PixelBuffer::filled(3, 3, Rgb::new(100, 100, 100)).unwrap();
        src.set(1, 1, Rgb::new(120, 90, 100));
        // 9*120 - 800 = 280 -> 255; 9*90 - 800 = 10
        assert_eq!(harshness_kernel().convolve_at(&src, 1, 1), Rgb::new(255, 10, 100));
    }

    #[test]
    fn test_motion_blur_kernel_shape() {
        let k = motion_blur_kernel();
        assert_eq!(k.radius(), (2, 2));
        assert_relative_eq!(k.at(-2, -2), 0.2);
        assert_relative_eq!(k.at(1, 1), 0.2);
        assert_relative_eq!(k.at(1, -1), 0.0);
        assert_relative_eq!(k.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_motion_blur_flat_region_unchanged() {
        let k = motion_blur_kernel();
        let src = PixelBuffer::filled(6, 6, Rgb::new(255, 3, 77)).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(k.convolve_at(&src, x, y), Rgb::new(255, 3, 77));
            }
        }
    }

    #[test]
    fn test_motion_blur_ignores_off_diagonal() {
        let mut src = PixelBuffer::filled(5, 5, Rgb::BLACK).unwrap();
        src.set(3, 1, Rgb::WHITE);
        assert_eq!(motion_blur_kernel().convolve_at(&src, 2, 2), Rgb::BLACK);
        src.set(3, 3, Rgb::new(250, 250, 250));
        assert_eq!(motion_blur_kernel().convolve_at(&src, 2, 2), Rgb::new(50, 50, 50));
    }
}
