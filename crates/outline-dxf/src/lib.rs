#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::indexing_slicing)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Board outline and mounting-hole extraction from Gerber/Excellon, with DXF output.

pub mod coord;
pub mod dxf;
pub mod error;
pub mod excellon;
pub mod gerber;
pub mod pipeline;

use wasm_bindgen::prelude::*;

pub use error::ConvertError;
pub use excellon::{HoleFilter, HoleRecord};
pub use gerber::OutlineEntity;
pub use pipeline::{convert, Conversion};

/// Initialize the WASM module. Sets up the panic hook for debugging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert an outline Gerber and any number of drill files into a DXF document.
///
/// # Errors
///
/// Returns a descriptive error string if the filter is invalid.
#[allow(clippy::needless_pass_by_value)]
#[wasm_bindgen]
pub fn convert_to_dxf(
    outline: &str,
    drills: Vec<String>,
    min_diameter_mm: f64,
    max_diameter_mm: Option<f64>,
) -> Result<String, JsValue> {
    let drill_texts: Vec<&str> = drills.iter().map(String::as_str).collect();
    let filter = HoleFilter::new(min_diameter_mm, max_diameter_mm);
    convert(outline, &drill_texts, filter)
        .map(|conversion| conversion.document)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract outline entities from a Gerber file given as raw bytes.
///
/// Returns `OutlineResult` as a `JsValue` via `serde-wasm-bindgen`.
///
/// # Errors
///
/// Returns a descriptive error string if the input is empty.
#[wasm_bindgen]
pub fn extract_outline(data: &[u8]) -> Result<JsValue, JsValue> {
    let result = extract_outline_internal(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal outline logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn extract_outline_internal(data: &[u8]) -> Result<gerber::OutlineResult, ConvertError> {
    if data.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    Ok(gerber::extract(&String::from_utf8_lossy(data)))
}

/// Extract mounting holes from an Excellon drill file given as raw bytes.
///
/// Returns `DrillResult` as a `JsValue` via `serde-wasm-bindgen`.
///
/// # Errors
///
/// Returns a descriptive error string if the diameter bounds are invalid.
#[wasm_bindgen]
pub fn extract_holes(
    data: &[u8],
    min_diameter_mm: f64,
    max_diameter_mm: Option<f64>,
) -> Result<JsValue, JsValue> {
    let filter = HoleFilter::new(min_diameter_mm, max_diameter_mm);
    let result =
        extract_holes_internal(data, filter).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal drill logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn extract_holes_internal(
    data: &[u8],
    filter: HoleFilter,
) -> Result<excellon::DrillResult, ConvertError> {
    filter.validate()?;
    Ok(excellon::extract(&String::from_utf8_lossy(data), filter))
}
