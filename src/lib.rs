//! filterworks
//!
//! Per-pixel image filters over 8-bit RGB buffers, with Python bindings via
//! PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! The core works on [`PixelBuffer`], a W×H grid of RGB pixels addressed as
//! `(x, y)`. The bindings accept arrays shaped:
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - alpha is carried through untouched
//!
//! ## Running Filters
//! Every filter is a pure function of the source image and a coordinate.
//! [`scan::run`] fills a new buffer column by column, reporting progress and
//! checking a [`CancelToken`] once per column. [`Operation`] adds the
//! two-pass Opening and Closing composites, and [`FilterJob`] moves either
//! onto a worker thread.
//!
//! ```
//! use filterworks::{scan, CancelToken, Filter, NoProgress, PixelBuffer, Rgb};
//!
//! let image = PixelBuffer::filled(4, 4, Rgb::new(100, 150, 200)).unwrap();
//! let gray = scan::run(&Filter::GrayScale, &image, &mut NoProgress, &CancelToken::new()).unwrap();
//! assert_eq!(gray.get(0, 0), Rgb::new(137, 137, 137));
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod filters;
pub mod job;
pub mod scan;

#[cfg(feature = "wasm")]
pub mod wasm;

use ndarray::{Array3, ArrayView3};

pub use buffer::{PixelBuffer, Rgb};
pub use config::{FilterKind, FilterSettings};
pub use error::{Cancelled, Channel, FilterError, FilterResult};
pub use filters::{Filter, Kernel, Operation};
pub use job::{FilterJob, JobEvent};
pub use scan::{CancelToken, NoProgress, ProgressSink, ScanOptions};

/// Apply the operation called `name` to a (height, width, 3|4) array.
///
/// The output has the input's shape; alpha, when present, is copied through.
pub fn apply_to_array(
    image: ArrayView3<u8>,
    name: &str,
    settings: &FilterSettings,
    options: ScanOptions,
) -> FilterResult<Array3<u8>> {
    let kind: FilterKind = name.parse()?;
    let source = PixelBuffer::from_array(image)?;
    let operation = kind.build(&source, settings)?;
    let result = operation.run(&source, &mut NoProgress, &CancelToken::new(), options)?;
    result.merge_alpha(image)
}

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::{apply_to_array, FilterError, FilterKind, FilterSettings, ScanOptions};

    fn to_py_err(err: FilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    /// Apply a named filter to an RGB or RGBA u8 image.
    ///
    /// # Arguments
    /// * `image` - Input image, shape (height, width, 3 or 4)
    /// * `name` - Filter name, see `filter_names()`
    /// * `gaussian_radius` - Radius of the Gaussian kernel
    /// * `gaussian_sigma` - Spread of the Gaussian kernel
    /// * `seed` - Glass seed; clock-seeded when omitted
    /// * `parallel` - Compute each column's rows on the thread pool
    #[pyfunction]
    #[pyo3(signature = (image, name, gaussian_radius=3, gaussian_sigma=2.0, seed=None, parallel=false))]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        name: &str,
        gaussian_radius: u32,
        gaussian_sigma: f64,
        seed: Option<u64>,
        parallel: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let settings = FilterSettings {
            gaussian_radius,
            gaussian_sigma,
            glass_seed: seed,
        };
        let options = ScanOptions {
            parallel,
            ..ScanOptions::default()
        };
        let result = apply_to_array(image.as_array(), name, &settings, options).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Names accepted by `apply_filter`.
    #[pyfunction]
    pub fn filter_names() -> Vec<&'static str> {
        FilterKind::ALL.iter().map(|kind| kind.as_str()).collect()
    }

    #[pymodule]
    pub fn filterworks(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;
        m.add_function(wrap_pyfunction!(filter_names, m)?)?;
        Ok(())
    }
}
