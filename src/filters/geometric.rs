//! Geometric remap filters: Transfer, Turn, Waves, Glass.
//!
//! Each filter maps the output coordinate `(x, y)` to a source coordinate
//! `(k, l)`, truncates toward zero, clamps it onto the image and copies that
//! source pixel verbatim. No blending is done.
//!
//! | Filter | k | l |
//! |--------|---|---|
//! | Transfer | x + 50 | y |
//! | Turn | rotation by 45° about the center | |
//! | Waves1 | x + 20·sin(2πy/60) | y |
//! | Waves2 | x | y + 20·sin(2πx/30) |
//! | Glass | x + (u₁-0.5)·5 | y + (u₂-0.5)·5 |

use std::f64::consts::{PI, SQRT_2};

use crate::buffer::{PixelBuffer, Rgb};
use super::core::sample_clamped;
use super::noise::{instance_seed, pixel_jitter};

/// Horizontal shift of the transfer filter.
pub const TRANSFER_SHIFT: i64 = 50;
/// Peak displacement of both wave filters.
pub const WAVE_AMPLITUDE: f64 = 20.0;
/// Maximum jitter span of the glass filter.
pub const GLASS_SPREAD: f64 = 5.0;

pub fn transfer_at(source: &PixelBuffer, x: usize, y: usize) -> Rgb {
    sample_clamped(source, x as i64 + TRANSFER_SHIFT, y as i64)
}

/// Rotate by 45° about `((W-1)/2, (H-1)/2)`.
pub fn turn_at(source: &PixelBuffer, x: usize, y: usize) -> Rgb {
    let x0 = ((source.width() - 1) / 2) as i64;
    let y0 = ((source.height() - 1) / 2) as i64;
    let dx = (x as i64 - x0) as f64;
    let dy = (y as i64 - y0) as f64;

    let k = (dx / SQRT_2 - dy / SQRT_2 + x0 as f64) as i64;
    let l = (dx / SQRT_2 + dy / SQRT_2 + y0 as f64) as i64;
    sample_clamped(source, k, l)
}

/// Horizontal displacement varying with the row, period 60 px.
pub fn waves_horizontal_at(source: &PixelBuffer, x: usize, y: usize) -> Rgb {
    let k = (x as f64 + WAVE_AMPLITUDE * (2.0 * PI * y as f64 / 60.0).sin()) as i64;
    sample_clamped(source, k, y as i64)
}

/// Vertical displacement varying with the column, period 30 px.
pub fn waves_vertical_at(source: &PixelBuffer, x: usize, y: usize) -> Rgb {
    let l = (y as f64 + WAVE_AMPLITUDE * (2.0 * PI * x as f64 / 30.0).sin()) as i64;
    sample_clamped(source, x as i64, l)
}

/// Frosted-glass scatter.
///
/// Every pixel is replaced by a nearby source pixel, at most 2 px forward
/// and 3 px back once truncated. Offsets are drawn from a generator keyed by
/// the seed and the pixel position, so one instance always produces the same
/// image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glass {
    seed: u64,
}

impl Glass {
    /// Seeded from the clock and a process-wide counter; two instances
    /// never share a seed.
    pub fn new() -> Self {
        Glass { seed: instance_seed() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Glass { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn apply(&self, source: &PixelBuffer, x: usize, y: usize) -> Rgb {
        let (u1, u2) = pixel_jitter(self.seed, x, y);
        let k = (x as f64 + (u1 - 0.5) * GLASS_SPREAD) as i64;
        let l = (y as f64 + (u2 - 0.5) * GLASS_SPREAD) as i64;
        sample_clamped(source, k, l)
    }
}

impl Default for Glass {
    fn default() -> Self {
        Self::new()
    }
}
