//! Field derivation for rental records.
//!
//! Each record is validated into `RentalTerms`, charges are computed, and only
//! then written back into the record. A record that fails anywhere along the
//! way is logged and left exactly as it was loaded; the rest of the batch is
//! still processed.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::domain::{
    Amount, DerivationReport, DerivedCharges, PRICE_PER_DAY, RENTAL_END, RENTAL_START,
    RecordIssue, RentalBatch, RentalTerms, SkippedRecord, UNITS_RENTED,
};

/// Derive charge fields for every record in the batch, in batch order.
pub fn derive_charges(batch: &mut RentalBatch) -> DerivationReport {
    debug!("Calculating new data.");

    let mut report = DerivationReport::default();
    for (id, record) in batch.iter_mut() {
        match derive_record(record) {
            Ok(_) => report.derived.push(id.clone()),
            Err(issue) => {
                log_skipped(id, record, &issue);
                report.skipped.push(SkippedRecord {
                    id: id.clone(),
                    issue,
                });
            }
        }
    }

    debug!(
        records = report.records_seen(),
        derived = report.derived.len(),
        skipped = report.skipped.len(),
        "Finished calculating new data."
    );
    report
}

/// Derive and store charges for a single record.
///
/// On error the record is not modified.
pub fn derive_record(record: &mut Value) -> Result<DerivedCharges, RecordIssue> {
    let fields = record.as_object_mut().ok_or(RecordIssue::NotAnObject)?;
    let terms = read_terms(fields)?;
    let charges = compute_charges(&terms)?;
    charges.apply_to(fields);
    Ok(charges)
}

/// Validate the required fields of a record.
///
/// Fields are checked in the order the charges use them: both dates, then
/// the date order, then price and units.
pub fn read_terms(fields: &Map<String, Value>) -> Result<RentalTerms, RecordIssue> {
    let rental_start = read_date(fields, RENTAL_START)?;
    let rental_end = read_date(fields, RENTAL_END)?;
    if rental_start > rental_end {
        return Err(RecordIssue::StartAfterEnd {
            start: rental_start,
            end: rental_end,
        });
    }

    let price_per_day = match require(fields, PRICE_PER_DAY)? {
        Value::Number(n) => Amount::from_number(n),
        _ => None,
    }
    .ok_or(RecordIssue::NotNumeric {
        field: PRICE_PER_DAY,
    })?;

    let units_rented = require(fields, UNITS_RENTED)?
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or(RecordIssue::NotNumeric {
            field: UNITS_RENTED,
        })?;

    Ok(RentalTerms {
        rental_start,
        rental_end,
        price_per_day,
        units_rented,
    })
}

/// Apply the charge formulas to validated terms.
pub fn compute_charges(terms: &RentalTerms) -> Result<DerivedCharges, RecordIssue> {
    let total_days = (terms.rental_end - terms.rental_start).num_days();
    let total_price = terms
        .price_per_day
        .times_days(total_days)
        .ok_or(RecordIssue::Overflow)?;

    let total = total_price.as_f64();
    if total < 0.0 {
        return Err(RecordIssue::NegativeTotal(total_price));
    }
    if terms.units_rented == 0.0 {
        return Err(RecordIssue::ZeroUnits);
    }

    Ok(DerivedCharges {
        total_days,
        total_price,
        sqrt_total_price: total.sqrt(),
        unit_cost: total / terms.units_rented,
    })
}

/// Two-digit years up to this value are 20xx, later ones 19xx.
const YEAR_PIVOT: u32 = 68;

/// Parse a `mm/dd/yy` date string.
///
/// Each part is one or two ASCII digits; surrounding whitespace is rejected.
pub fn parse_rental_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('/');
    let month = date_part(parts.next()?)?;
    let day = date_part(parts.next()?)?;
    let yy = date_part(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    let year = if yy <= YEAR_PIVOT { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn date_part(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn read_date(fields: &Map<String, Value>, name: &'static str) -> Result<NaiveDate, RecordIssue> {
    let value = require(fields, name)?;
    value
        .as_str()
        .and_then(parse_rental_date)
        .ok_or_else(|| RecordIssue::BadDate {
            field: name,
            value: value.to_string(),
        })
}

fn require<'a>(fields: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, RecordIssue> {
    fields.get(name).ok_or(RecordIssue::MissingField(name))
}

fn log_skipped(id: &str, record: &Value, issue: &RecordIssue) {
    if let RecordIssue::StartAfterEnd { .. } = issue {
        warn!(record_id = id, "Rental start date is after rental end date.");
    }
    if issue.is_missing_data() {
        error!(record_id = id, reason = %issue, "Missing data in file. Skipping data: {record}");
    } else {
        error!(record_id = id, reason = %issue, "Bad data in file. Skipping data: {record}");
    }
}
