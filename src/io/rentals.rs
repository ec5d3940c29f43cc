//! Read/write rental batch JSON files.
//!
//! The file is a single JSON object mapping record id to record object:
//!
//! ```json
//! {"RNT001": {"rental_start": "6/12/17", "rental_end": "4/25/18", "price_per_day": 31, "units_rented": 1}}
//! ```
//!
//! Key order is preserved in both directions.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::domain::RentalBatch;
use crate::error::AppError;

/// Read a rental batch file.
///
/// Fails if the file cannot be opened, is not valid JSON, or its top level is
/// not an object. Individual record values are not inspected here.
pub fn load_rentals(path: &Path) -> Result<RentalBatch, AppError> {
    debug!(path = %path.display(), "Loading rentals file.");

    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open input JSON '{}': {e}", path.display())))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::input(format!("Invalid input JSON '{}': {e}", path.display())))?;

    match value {
        Value::Object(records) => Ok(RentalBatch::new(records)),
        other => Err(AppError::input(format!(
            "Invalid input JSON '{}': expected an object of records, found {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

/// Write the whole batch, derived or not, to a JSON file.
pub fn save_rentals(path: &Path, batch: &RentalBatch) -> Result<(), AppError> {
    debug!(path = %path.display(), "Writing calculated data to file.");

    let file = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to open output file '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, batch)
        .map_err(|e| AppError::usage(format!("Failed to write output JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to write output JSON: {e}")))?;

    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
