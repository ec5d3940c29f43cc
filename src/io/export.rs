//! Export a per-record charge summary to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets. Records the
//! deriver skipped still get a row, with the derived columns left empty.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::domain::{
    RENTAL_END, RENTAL_START, RentalBatch, SQRT_TOTAL_PRICE, TOTAL_DAYS, TOTAL_PRICE, UNIT_COST,
};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    id: &'a str,
    rental_start: String,
    rental_end: String,
    total_days: String,
    total_price: String,
    sqrt_total_price: String,
    unit_cost: String,
}

/// Write one summary row per record, in batch order.
pub fn write_summary_csv(path: &Path, batch: &RentalBatch) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for (id, record) in batch.iter() {
        let row = SummaryRow {
            id,
            rental_start: cell(record, RENTAL_START),
            rental_end: cell(record, RENTAL_END),
            total_days: cell(record, TOTAL_DAYS),
            total_price: cell(record, TOTAL_PRICE),
            sqrt_total_price: cell(record, SQRT_TOTAL_PRICE),
            unit_cost: cell(record, UNIT_COST),
        };
        writer
            .serialize(row)
            .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to write export CSV: {e}")))?;
    Ok(())
}

fn cell(record: &Value, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;

    #[test]
    fn summary_has_header_and_blank_cells_for_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let batch: RentalBatch = serde_json::from_value(json!({
            "R1": {
                "rental_start": "01/01/20", "rental_end": "01/11/20",
                "total_days": 10, "total_price": 100, "sqrt_total_price": 10.0, "unit_cost": 50.0
            },
            "R2": {"rental_start": "01/11/20", "rental_end": "01/01/20"}
        }))
        .unwrap();

        write_summary_csv(&path, &batch).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id,rental_start,rental_end,total_days,total_price,sqrt_total_price,unit_cost",
                "R1,01/01/20,01/11/20,10,100,10.0,50.0",
                "R2,01/11/20,01/01/20,,,,",
            ]
        );
    }
}
