//! RGB pixel storage shared by every filter.
//!
//! ## Layout
//!
//! Pixels live in an `ndarray` array of shape (height, width, 3), the same
//! row-major layout the numpy and WASM bindings hand over. Coordinates in
//! the public API are always `(x, y)` = (column, row).

use ndarray::{s, Array3, ArrayView3};

use crate::error::{FilterError, FilterResult};

/// One RGB pixel with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Build a pixel from wide integers, clamping each channel into 0-255.
    #[inline]
    pub fn from_clamped(r: i64, g: i64, b: i64) -> Self {
        Rgb {
            r: r.clamp(0, 255) as u8,
            g: g.clamp(0, 255) as u8,
            b: b.clamp(0, 255) as u8,
        }
    }

    /// Sum of the three channels, used as the median ordering key.
    #[inline]
    pub fn sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Owned W×H grid of RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

fn check_dimensions(width: usize, height: usize) -> FilterResult<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::InvalidDimensions(format!(
            "image must be at least 1x1, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

impl PixelBuffer {
    /// Black buffer of the given size.
    pub fn new(width: usize, height: usize) -> FilterResult<Self> {
        check_dimensions(width, height)?;
        Ok(PixelBuffer {
            data: Array3::<u8>::zeros((height, width, 3)),
        })
    }

    /// Black buffer with the same dimensions as `self`.
    pub fn blank_like(&self) -> Self {
        PixelBuffer {
            data: Array3::<u8>::zeros(self.data.raw_dim()),
        }
    }

    /// Buffer with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> FilterResult<Self> {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Buffer whose pixel at `(x, y)` is `f(x, y)`.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> FilterResult<Self>
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let mut buffer = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                buffer.set(x, y, f(x, y));
            }
        }
        Ok(buffer)
    }

    /// Wrap interleaved row-major RGB bytes.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> FilterResult<Self> {
        check_dimensions(width, height)?;
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| FilterError::InvalidDimensions("image dimensions overflow".into()))?;
        if data.len() != expected {
            return Err(FilterError::InvalidDimensions(format!(
                "expected {} bytes for {}x{} RGB, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        let data = Array3::from_shape_vec((height, width, 3), data)
            .map_err(|e| FilterError::InvalidDimensions(e.to_string()))?;
        Ok(PixelBuffer { data })
    }

    /// Copy the color channels of a (height, width, 3|4) array.
    ///
    /// Alpha, if present, is ignored; use [`PixelBuffer::merge_alpha`] to
    /// put it back on the way out.
    pub fn from_array(input: ArrayView3<u8>) -> FilterResult<Self> {
        let (height, width, channels) = input.dim();
        check_dimensions(width, height)?;
        if channels != 3 && channels != 4 {
            return Err(FilterError::InvalidDimensions(format!(
                "expected 3 or 4 channels, got {}",
                channels
            )));
        }
        Ok(PixelBuffer {
            data: input.slice(s![.., .., 0..3]).to_owned(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Pixel at column `x`, row `y`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        Rgb::new(
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        )
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.data[[y, x, 0]] = color.r;
        self.data[[y, x, 1]] = color.g;
        self.data[[y, x, 2]] = color.b;
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        let (width, height) = (self.width(), self.height());
        (0..height).flat_map(move |y| (0..width).map(move |x| self.get(x, y)))
    }

    pub fn as_array(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Interleaved row-major RGB bytes.
    pub fn into_raw(self) -> Vec<u8> {
        if self.data.is_standard_layout() {
            let (raw, _) = self.data.into_raw_vec_and_offset();
            raw
        } else {
            self.data.iter().copied().collect()
        }
    }

    /// Recombine with the alpha channel of `original`.
    ///
    /// The output has the channel count of `original`: RGB stays RGB, RGBA
    /// gets its alpha copied through unchanged.
    pub fn merge_alpha(self, original: ArrayView3<u8>) -> FilterResult<Array3<u8>> {
        let (height, width, channels) = original.dim();
        if width != self.width() || height != self.height() {
            return Err(FilterError::InvalidDimensions(format!(
                "alpha source is {}x{}, buffer is {}x{}",
                width,
                height,
                self.width(),
                self.height()
            )));
        }
        match channels {
            3 => Ok(self.into_array()),
            4 => {
                let mut output = Array3::<u8>::zeros((height, width, 4));
                output.slice_mut(s![.., .., 0..3]).assign(&self.data);
                output
                    .slice_mut(s![.., .., 3])
                    .assign(&original.slice(s![.., .., 3]));
                Ok(output)
            }
            _ => Err(FilterError::InvalidDimensions(format!(
                "expected 3 or 4 channels, got {}",
                channels
            ))),
        }
    }
}
