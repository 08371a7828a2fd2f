//! WebAssembly exports for filterworks.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images travel
//! as flat RGBA bytes (`ImageData.data`); alpha is returned unchanged.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::{apply_to_array, FilterKind, FilterSettings, ScanOptions};

fn to_js_err<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Apply a named filter to an RGBA u8 image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `name` - Filter name, see `filter_names_wasm`
/// * `seed` - Glass seed; a fresh per-call seed when `undefined`
///
/// # Returns
/// Flat array of RGBA bytes, or an error string for an unknown filter or
/// mismatched dimensions.
#[wasm_bindgen]
pub fn apply_filter_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    name: &str,
    seed: Option<u64>,
) -> Result<Vec<u8>, JsValue> {
    let input = Array3::from_shape_vec((height, width, 4), data.to_vec()).map_err(to_js_err)?;
    let settings = FilterSettings {
        glass_seed: seed,
        ..FilterSettings::default()
    };
    let result = apply_to_array(input.view(), name, &settings, ScanOptions::default())
        .map_err(to_js_err)?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Names accepted by `apply_filter_rgba_wasm`.
#[wasm_bindgen]
pub fn filter_names_wasm() -> Vec<String> {
    FilterKind::ALL.iter().map(|kind| kind.to_string()).collect()
}
