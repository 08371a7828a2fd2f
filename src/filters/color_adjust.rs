//! Color adjustment point filters: Invert, Brightness, Gray World.
//!
//! Each output pixel depends only on the source pixel at the same position
//! (plus, for Gray World, an average precomputed from the whole image).

use tracing::debug;

use crate::buffer::{PixelBuffer, Rgb};
use crate::error::{Channel, FilterError, FilterResult};
use super::core::quantize;

/// Amount added to every channel by the brightness filter.
pub const BRIGHTNESS_COEF: i64 = 30;

// ============================================================================
// Invert / Brightness
// ============================================================================

#[inline]
pub fn invert(px: Rgb) -> Rgb {
    Rgb::new(255 - px.r, 255 - px.g, 255 - px.b)
}

#[inline]
pub fn brightness(px: Rgb) -> Rgb {
    Rgb::from_clamped(
        px.r as i64 + BRIGHTNESS_COEF,
        px.g as i64 + BRIGHTNESS_COEF,
        px.b as i64 + BRIGHTNESS_COEF,
    )
}

// ============================================================================
// Gray World
// ============================================================================

/// Gray-world white balance.
///
/// Scales each channel so that the image average becomes neutral gray.
/// The average is measured once, at construction, from the image the filter
/// will later be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayWorld {
    average: Rgb,
    /// `(R̄ + Ḡ + B̄) / 3`, integer division.
    target: u32,
}

impl GrayWorld {
    /// Measure `source`. A channel whose average is zero passes through unchanged.
    pub fn new(source: &PixelBuffer) -> Self {
        let average = average_color(source);
        let target = average.sum() / 3;
        debug!(r = average.r, g = average.g, b = average.b, target, "gray world average");
        GrayWorld { average, target }
    }

    /// Like [`GrayWorld::new`] but rejects an image with a zero average channel.
    pub fn strict(source: &PixelBuffer) -> FilterResult<Self> {
        let filter = Self::new(source);
        let avg = filter.average;
        for (value, channel) in [
            (avg.r, Channel::Red),
            (avg.g, Channel::Green),
            (avg.b, Channel::Blue),
        ] {
            if value == 0 {
                return Err(FilterError::DivisionByZero(channel));
            }
        }
        Ok(filter)
    }

    /// Measured average color.
    pub fn average(&self) -> Rgb {
        self.average
    }

    #[inline]
    fn scale(&self, value: u8, avg: u8) -> u8 {
        if avg == 0 {
            return value;
        }
        quantize(value as f64 * self.target as f64 / avg as f64)
    }

    #[inline]
    pub fn apply(&self, px: Rgb) -> Rgb {
        Rgb::new(
            self.scale(px.r, self.average.r),
            self.scale(px.g, self.average.g),
            self.scale(px.b, self.average.b),
        )
    }
}

/// Per-channel arithmetic mean over every pixel, truncated.
pub fn average_color(source: &PixelBuffer) -> Rgb {
    let sums = source.pixels().fold([0u64; 3], |acc, px| {
        [
            acc[0] + px.r as u64,
            acc[1] + px.g as u64,
            acc[2] + px.b as u64,
        ]
    });

    let count = (source.width() * source.height()) as u64;
    Rgb::from_clamped(
        (sums[0] / count) as i64,
        (sums[1] / count) as i64,
        (sums[2] / count) as i64,
    )
}
