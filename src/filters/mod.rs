//! Filter modules for image processing effects.
//!
//! ## Filter Families
//!
//! | Family | Filters | Reads |
//! |--------|---------|-------|
//! | Point | Invert, GrayScale, Sepia, Brightness, GrayWorld | the pixel itself |
//! | Geometric remap | Transfer, Turn, Waves1, Waves2, Glass | one remapped pixel |
//! | Statistical | Dilation, Erosion, Median | 3×3 neighborhood |
//! | Convolution | Blur, Gaussian, Harshness, MotionBlur, Sobel, Custom | kernel footprint |
//! | Composite | Opening, Closing | two full passes |
//!
//! ## Architecture
//!
//! All single-pass filters share one contract:
//! - **Pure per pixel** - [`Filter::apply`] depends only on the source image,
//!   the coordinate and parameters fixed at construction
//! - **Edge clamping** - out-of-range samples are clamped onto the image
//! - **Saturating channels** - every channel write is clamped to 0-255
//! - **Order independent** - pixels may be computed in any order or in parallel

pub mod core;
pub mod color_adjust;
pub mod grayscale;
pub mod geometric;
pub mod noise;
pub mod morphology;
pub mod blur;
pub mod sharpen;
pub mod edge;

use crate::buffer::{PixelBuffer, Rgb};
use crate::error::{Cancelled, FilterResult};
use crate::scan::{self, CancelToken, ProgressSink, ScanOptions};

pub use self::color_adjust::GrayWorld;
pub use self::core::{clamp, Kernel};
pub use self::edge::Sobel;
pub use self::geometric::Glass;
pub use self::morphology::Composite;

/// A single-pass filter with its precomputed parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Invert,
    GrayScale,
    Sepia,
    BrightnessInc,
    GrayWorld(GrayWorld),
    Transfer,
    Turn,
    Waves1,
    Waves2,
    Glass(Glass),
    Dilation,
    Erosion,
    Median,
    Blur(Kernel),
    Gaussian(Kernel),
    Harshness(Kernel),
    MotionBlur(Kernel),
    Sobel(Sobel),
    /// Convolution with a caller-supplied kernel.
    Custom(Kernel),
}

impl Filter {
    pub fn blur() -> Self {
        Filter::Blur(blur::blur_kernel())
    }

    pub fn gaussian(radius: u32, sigma: f64) -> FilterResult<Self> {
        Ok(Filter::Gaussian(blur::gaussian_kernel(radius, sigma)?))
    }

    pub fn harshness() -> Self {
        Filter::Harshness(sharpen::harshness_kernel())
    }

    pub fn motion_blur() -> Self {
        Filter::MotionBlur(sharpen::motion_blur_kernel())
    }

    pub fn sobel() -> Self {
        Filter::Sobel(Sobel::new())
    }

    /// Glass seeded from the clock.
    pub fn glass() -> Self {
        Filter::Glass(Glass::new())
    }

    pub fn glass_seeded(seed: u64) -> Self {
        Filter::Glass(Glass::with_seed(seed))
    }

    pub fn gray_world(source: &PixelBuffer) -> Self {
        Filter::GrayWorld(GrayWorld::new(source))
    }

    /// Gray World that refuses an image with a zero average channel.
    pub fn gray_world_strict(source: &PixelBuffer) -> FilterResult<Self> {
        Ok(Filter::GrayWorld(GrayWorld::strict(source)?))
    }

    /// Short name used in logs and by the bindings.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Invert => "invert",
            Filter::GrayScale => "grayscale",
            Filter::Sepia => "sepia",
            Filter::BrightnessInc => "brightness",
            Filter::GrayWorld(_) => "gray_world",
            Filter::Transfer => "transfer",
            Filter::Turn => "turn",
            Filter::Waves1 => "waves1",
            Filter::Waves2 => "waves2",
            Filter::Glass(_) => "glass",
            Filter::Dilation => "dilation",
            Filter::Erosion => "erosion",
            Filter::Median => "median",
            Filter::Blur(_) => "blur",
            Filter::Gaussian(_) => "gaussian",
            Filter::Harshness(_) => "harshness",
            Filter::MotionBlur(_) => "motion_blur",
            Filter::Sobel(_) => "sobel",
            Filter::Custom(_) => "custom",
        }
    }

    /// Output pixel at `(x, y)`.
    ///
    /// `x < source.width()` and `y < source.height()` must hold.
    pub fn apply(&self, source: &PixelBuffer, x: usize, y: usize) -> Rgb {
        match self {
            Filter::Invert => color_adjust::invert(source.get(x, y)),
            Filter::GrayScale => grayscale::grayscale(source.get(x, y)),
            Filter::Sepia => grayscale::sepia(source.get(x, y)),
            Filter::BrightnessInc => color_adjust::brightness(source.get(x, y)),
            Filter::GrayWorld(gw) => gw.apply(source.get(x, y)),
            Filter::Transfer => geometric::transfer_at(source, x, y),
            Filter::Turn => geometric::turn_at(source, x, y),
            Filter::Waves1 => geometric::waves_horizontal_at(source, x, y),
            Filter::Waves2 => geometric::waves_vertical_at(source, x, y),
            Filter::Glass(glass) => glass.apply(source, x, y),
            Filter::Dilation => morphology::dilate_at(source, x, y),
            Filter::Erosion => morphology::erode_at(source, x, y),
            Filter::Median => noise::median_at(source, x, y),
            Filter::Blur(k)
            | Filter::Gaussian(k)
            | Filter::Harshness(k)
            | Filter::MotionBlur(k)
            | Filter::Custom(k) => k.convolve_at(source, x, y),
            Filter::Sobel(sobel) => sobel.apply(source, x, y),
        }
    }
}

/// Anything the scanner can run: one filter or a two-pass composite.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Filter(Filter),
    Opening,
    Closing,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Filter(filter) => filter.name(),
            Operation::Opening => "opening",
            Operation::Closing => "closing",
        }
    }

    /// Filters in execution order.
    pub fn passes(&self) -> Vec<Filter> {
        match self {
            Operation::Filter(filter) => vec![filter.clone()],
            Operation::Opening => Composite::Opening.passes().to_vec(),
            Operation::Closing => Composite::Closing.passes().to_vec(),
        }
    }

    /// Run every pass in order, each reading the previous pass's output.
    pub fn run<P: ProgressSink>(
        &self,
        source: &PixelBuffer,
        progress: &mut P,
        cancel: &CancelToken,
        options: ScanOptions,
    ) -> Result<PixelBuffer, Cancelled> {
        scan::run_chain(&self.passes(), source, progress, cancel, options)
    }
}

impl From<Filter> for Operation {
    fn from(filter: Filter) -> Self {
        Operation::Filter(filter)
    }
}

impl From<Composite> for Operation {
    fn from(composite: Composite) -> Self {
        match composite {
            Composite::Opening => Operation::Opening,
            Composite::Closing => Operation::Closing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        PixelBuffer::from_fn(6, 5, |x, y| {
            Rgb::new((x * 40) as u8, (y * 50) as u8, ((x + y) * 20) as u8)
        })
        .unwrap()
    }

    #[test]
    fn test_apply_point_filters() {
        let src = PixelBuffer::filled(1, 1, Rgb::new(100, 150, 200)).unwrap();
        assert_eq!(Filter::Invert.apply(&src, 0, 0), Rgb::new(155, 105, 55));
        assert_eq!(Filter::GrayScale.apply(&src, 0, 0), Rgb::new(137, 137, 137));
        assert_eq!(Filter::BrightnessInc.apply(&src, 0, 0), Rgb::new(130, 180, 230));
    }

    #[test]
    fn test_every_filter_stays_in_bounds() {
        let src = sample();
        let filters = vec![
            Filter::Invert,
            Filter::GrayScale,
            Filter::Sepia,
            Filter::BrightnessInc,
            Filter::gray_world(&src),
            Filter::Transfer,
            Filter::Turn,
            Filter::Waves1,
            Filter::Waves2,
            Filter::glass_seeded(3),
            Filter::Dilation,
            Filter::Erosion,
            Filter::Median,
            Filter::blur(),
            Filter::gaussian(blur::GAUSSIAN_RADIUS, blur::GAUSSIAN_SIGMA).unwrap(),
            Filter::harshness(),
            Filter::motion_blur(),
            Filter::sobel(),
        ];
        for filter in &filters {
            for y in 0..src.height() {
                for x in 0..src.width() {
                    // Must not panic on any coordinate.
                    let _ = filter.apply(&src, x, y);
                }
            }
        }
    }

    #[test]
    fn test_single_pixel_image() {
        let src = PixelBuffer::filled(1, 1, Rgb::new(9, 99, 199)).unwrap();
        for filter in [
            Filter::Transfer,
            Filter::Turn,
            Filter::Waves1,
            Filter::Waves2,
            Filter::glass_seeded(1),
            Filter::Dilation,
            Filter::Erosion,
            Filter::Median,
            Filter::blur(),
            Filter::motion_blur(),
        ] {
            assert_eq!(filter.apply(&src, 0, 0), Rgb::new(9, 99, 199), "{}", filter.name());
        }
    }

    #[test]
    fn test_custom_kernel() {
        let shift = Kernel::from_rows(3, 1, vec![0.0, 0.0, 1.0]).unwrap();
        let src = sample();
        assert_eq!(Filter::Custom(shift).apply(&src, 2, 1), src.get(3, 1));
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::from(Composite::Opening).name(), "opening");
        assert_eq!(Operation::from(Filter::sobel()).name(), "sobel");
        assert_eq!(Operation::from(Composite::Closing).passes().len(), 2);
    }
}
