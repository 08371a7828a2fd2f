//! Intensity-based point filters: GrayScale and Sepia.
//!
//! Both derive a single intensity from the RGB channels using fixed,
//! luma-like weights (not BT.709), truncated toward zero.

use crate::buffer::Rgb;
use super::core::{quantize, truncate};

/// Intensity weights.
const LUMA_R: f64 = 0.36;
const LUMA_G: f64 = 0.53;
const LUMA_B: f64 = 0.11;

/// Sepia tint strength.
pub const SEPIA_COEF: i64 = 30;

/// Truncated intensity `0.36R + 0.53G + 0.11B`.
#[inline]
pub fn intensity(px: Rgb) -> i64 {
    truncate(LUMA_R * px.r as f64 + LUMA_G * px.g as f64 + LUMA_B * px.b as f64)
}

/// Gray pixel with R = G = B = intensity.
#[inline]
pub fn grayscale(px: Rgb) -> Rgb {
    let i = intensity(px);
    Rgb::from_clamped(i, i, i)
}

/// Warm-toned gray: red lifted by 2c, green by c/2, blue lowered by c.
#[inline]
pub fn sepia(px: Rgb) -> Rgb {
    let i = intensity(px);
    let c = SEPIA_COEF;
    Rgb::new(
        quantize((i + 2 * c) as f64),
        quantize(i as f64 + 0.5 * c as f64),
        quantize((i - c) as f64),
    )
}
