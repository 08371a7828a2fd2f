//! Named operations and their construction parameters.
//!
//! [`FilterKind`] is the string-addressable catalogue used by the bindings
//! and by [`crate::job::FilterJob`] callers; [`FilterSettings`] carries the
//! few parameters some filters take.

use std::fmt;
use std::str::FromStr;

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, FilterResult};
use crate::filters::{blur, Filter, Operation};

/// Every operation that can be built by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Invert,
    GrayScale,
    Sepia,
    Brightness,
    GrayWorld,
    Transfer,
    Turn,
    Waves1,
    Waves2,
    Glass,
    Dilation,
    Erosion,
    Median,
    Opening,
    Closing,
    Blur,
    Gaussian,
    Harshness,
    MotionBlur,
    Sobel,
}

impl FilterKind {
    pub const ALL: [FilterKind; 20] = [
        FilterKind::Invert,
        FilterKind::GrayScale,
        FilterKind::Sepia,
        FilterKind::Brightness,
        FilterKind::GrayWorld,
        FilterKind::Transfer,
        FilterKind::Turn,
        FilterKind::Waves1,
        FilterKind::Waves2,
        FilterKind::Glass,
        FilterKind::Dilation,
        FilterKind::Erosion,
        FilterKind::Median,
        FilterKind::Opening,
        FilterKind::Closing,
        FilterKind::Blur,
        FilterKind::Gaussian,
        FilterKind::Harshness,
        FilterKind::MotionBlur,
        FilterKind::Sobel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Invert => "invert",
            FilterKind::GrayScale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Brightness => "brightness",
            FilterKind::GrayWorld => "gray_world",
            FilterKind::Transfer => "transfer",
            FilterKind::Turn => "turn",
            FilterKind::Waves1 => "waves1",
            FilterKind::Waves2 => "waves2",
            FilterKind::Glass => "glass",
            FilterKind::Dilation => "dilation",
            FilterKind::Erosion => "erosion",
            FilterKind::Median => "median",
            FilterKind::Opening => "opening",
            FilterKind::Closing => "closing",
            FilterKind::Blur => "blur",
            FilterKind::Gaussian => "gaussian",
            FilterKind::Harshness => "harshness",
            FilterKind::MotionBlur => "motion_blur",
            FilterKind::Sobel => "sobel",
        }
    }

    /// Construct the operation.
    ///
    /// `source` is only read by GrayWorld, whose averages are taken from the
    /// image it will be applied to.
    pub fn build(&self, source: &PixelBuffer, settings: &FilterSettings) -> FilterResult<Operation> {
        let filter = match self {
            FilterKind::Invert => Filter::Invert,
            FilterKind::GrayScale => Filter::GrayScale,
            FilterKind::Sepia => Filter::Sepia,
            FilterKind::Brightness => Filter::BrightnessInc,
            FilterKind::GrayWorld => Filter::gray_world(source),
            FilterKind::Transfer => Filter::Transfer,
            FilterKind::Turn => Filter::Turn,
            FilterKind::Waves1 => Filter::Waves1,
            FilterKind::Waves2 => Filter::Waves2,
            FilterKind::Glass => match settings.glass_seed {
                Some(seed) => Filter::glass_seeded(seed),
                None => Filter::glass(),
            },
            FilterKind::Dilation => Filter::Dilation,
            FilterKind::Erosion => Filter::Erosion,
            FilterKind::Median => Filter::Median,
            FilterKind::Opening => return Ok(Operation::Opening),
            FilterKind::Closing => return Ok(Operation::Closing),
            FilterKind::Blur => Filter::blur(),
            FilterKind::Gaussian => {
                Filter::gaussian(settings.gaussian_radius, settings.gaussian_sigma)?
            }
            FilterKind::Harshness => Filter::harshness(),
            FilterKind::MotionBlur => Filter::motion_blur(),
            FilterKind::Sobel => Filter::sobel(),
        };
        Ok(Operation::Filter(filter))
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "sharpen" {
            return Ok(FilterKind::Harshness);
        }
        FilterKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| FilterError::InvalidParameter(format!("unknown filter: {}", s)))
    }
}

/// Parameters for the filters that take any.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSettings {
    pub gaussian_radius: u32,
    pub gaussian_sigma: f64,
    /// Glass seed; `None` seeds from the clock.
    pub glass_seed: Option<u64>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            gaussian_radius: blur::GAUSSIAN_RADIUS,
            gaussian_sigma: blur::GAUSSIAN_SIGMA,
            glass_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    #[test]
    fn test_names_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.to_string().parse::<FilterKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_aliases_and_case() {
        assert_eq!("sharpen".parse::<FilterKind>().unwrap(), FilterKind::Harshness);
        assert_eq!(" Sobel ".parse::<FilterKind>().unwrap(), FilterKind::Sobel);
        assert!(matches!(
            "posterize".parse::<FilterKind>(),
            Err(FilterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_build_uses_settings() {
        let src = PixelBuffer::filled(2, 2, Rgb::new(1, 2, 3)).unwrap();
        let settings = FilterSettings {
            gaussian_radius: 1,
            glass_seed: Some(11),
            ..FilterSettings::default()
        };
        match FilterKind::Gaussian.build(&src, &settings).unwrap() {
            Operation::Filter(Filter::Gaussian(k)) => assert_eq!(k.radius(), (1, 1)),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            FilterKind::Glass.build(&src, &settings).unwrap(),
            Operation::Filter(Filter::glass_seeded(11))
        );
        assert_eq!(FilterKind::Opening.build(&src, &settings).unwrap(), Operation::Opening);
    }

    #[test]
    fn test_build_rejects_bad_sigma() {
        let src = PixelBuffer::new(1, 1).unwrap();
        let settings = FilterSettings { gaussian_sigma: -1.0, ..FilterSettings::default() };
        assert!(FilterKind::Gaussian.build(&src, &settings).is_err());
    }

    #[test]
    fn test_built_names_match() {
        let src = PixelBuffer::new(3, 3).unwrap();
        let settings = FilterSettings::default();
        for kind in FilterKind::ALL {
            assert_eq!(kind.build(&src, &settings).unwrap().name(), kind.as_str());
        }
    }
}
