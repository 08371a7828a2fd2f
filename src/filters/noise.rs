//! Noise filters: Median, and the seeded jitter source behind Glass.
//!
//! ## Median
//!
//! The 3×3 window is ordered by channel sum `R+G+B` and the middle element
//! is returned whole. This is a median of summed intensity, not a per-channel
//! median, so the output is always one of the input colors.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::buffer::{PixelBuffer, Rgb};
use super::core::clamp;

// ============================================================================
// Seeded jitter (deterministic per pixel)
// ============================================================================

/// Simple linear congruential generator.
/// Uses MINSTD parameters.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng {
            state: seed % 2147483646 + 1, // Avoid zero
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(48271) % 2147483647;
        self.state as u32
    }

    /// Uniform f64 in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u32() - 1) as f64 / 2147483646.0
    }
}

/// SplitMix64 finalizer, spreads nearby keys across the whole u64 range.
#[inline]
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Two uniform values in [0, 1) for pixel `(x, y)` under `seed`.
///
/// The same inputs always give the same pair, independent of the order in
/// which pixels are visited.
pub fn pixel_jitter(seed: u64, x: usize, y: usize) -> (f64, f64) {
    let key = mix(seed ^ mix(((x as u64) << 32) | (y as u64 & 0xFFFF_FFFF)));
    let mut rng = SimpleRng::new(key);
    (rng.next_f64(), rng.next_f64())
}

/// Fresh seed for an unseeded generator.
///
/// Mixes a per-process counter with the wall clock where one exists, so two
/// calls never return the same seed within a process.
pub fn instance_seed() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    mix(clock_nanos()).wrapping_add(mix(count))
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_nanos() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

// std has no clock on wasm32-unknown-unknown; `SystemTime::now` panics there.
#[cfg(target_arch = "wasm32")]
fn clock_nanos() -> u64 {
    0
}

// ============================================================================
// Median Filter
// ============================================================================

/// Band of sample coordinates for the median window on an axis of `len`.
///
/// The window never touches the outermost row or column. On a 2 px axis the
/// band `[1, 0]` is inverted and [`clamp`] resolves it to index 0; a 1 px
/// axis only has index 0.
#[inline]
fn median_band(len: usize) -> (i64, i64) {
    if len >= 2 {
        (1, len as i64 - 2)
    } else {
        (0, 0)
    }
}

/// Median of the 3×3 neighborhood of `(x, y)` ordered by channel sum.
pub fn median_at(source: &PixelBuffer, x: usize, y: usize) -> Rgb {
    let (x_lo, x_hi) = median_band(source.width());
    let (y_lo, y_hi) = median_band(source.height());

    let mut window = [Rgb::BLACK; 9];
    let mut k = 0;
    for dx in -1..=1i64 {
        for dy in -1..=1i64 {
            let sx = clamp(x as i64 + dx, x_lo, x_hi) as usize;
            let sy = clamp(y as i64 + dy, y_lo, y_hi) as usize;
            window[k] = source.get(sx, sy);
            k += 1;
        }
    }

    // Stable: ties keep sampling order.
    window.sort_by_key(|c| c.sum());
    window[4]
}
