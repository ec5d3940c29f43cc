//! Shared domain types.
//!
//! Rental records are kept as loosely-typed JSON objects so that fields we do
//! not know about survive a load/derive/write cycle untouched. Typed views
//! (`RentalTerms`, `DerivedCharges`) are built on demand by the deriver.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub const RENTAL_START: &str = "rental_start";
pub const RENTAL_END: &str = "rental_end";
pub const PRICE_PER_DAY: &str = "price_per_day";
pub const UNITS_RENTED: &str = "units_rented";

pub const TOTAL_DAYS: &str = "total_days";
pub const TOTAL_PRICE: &str = "total_price";
pub const SQRT_TOTAL_PRICE: &str = "sqrt_total_price";
pub const UNIT_COST: &str = "unit_cost";

/// Resolved settings for one `charges calc` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub export_csv: Option<PathBuf>,
}

/// Every record in a batch, keyed by record id, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentalBatch {
    records: Map<String, Value>,
}

impl RentalBatch {
    pub fn new(records: Map<String, Value>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.records.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.records.iter_mut()
    }
}

/// A monetary amount that remembers whether it came in as a whole number.
///
/// `price_per_day: 10` must produce `total_price: 100`, not `100.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Whole(i64),
    Fractional(f64),
}

impl Amount {
    pub fn from_number(n: &Number) -> Option<Self> {
        if let Some(v) = n.as_i64() {
            return Some(Amount::Whole(v));
        }
        n.as_f64().filter(|v| v.is_finite()).map(Amount::Fractional)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Amount::Whole(v) => v as f64,
            Amount::Fractional(v) => v,
        }
    }

    /// Multiply by a day count, `None` on overflow or a non-finite result.
    pub fn times_days(self, days: i64) -> Option<Self> {
        match self {
            Amount::Whole(v) => v.checked_mul(days).map(Amount::Whole),
            Amount::Fractional(v) => {
                let total = v * days as f64;
                total.is_finite().then_some(Amount::Fractional(total))
            }
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            Amount::Whole(v) => Value::from(v),
            Amount::Fractional(v) => Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Whole(v) => write!(f, "{v}"),
            Amount::Fractional(v) => write!(f, "{v}"),
        }
    }
}

/// The validated inputs of one rental record.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalTerms {
    pub rental_start: NaiveDate,
    pub rental_end: NaiveDate,
    pub price_per_day: Amount,
    pub units_rented: f64,
}

/// Fields computed for a record that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedCharges {
    pub total_days: i64,
    pub total_price: Amount,
    pub sqrt_total_price: f64,
    pub unit_cost: f64,
}

impl DerivedCharges {
    /// Write all four derived fields into a record, replacing earlier values.
    pub fn apply_to(&self, fields: &mut Map<String, Value>) {
        fields.insert(TOTAL_DAYS.to_string(), Value::from(self.total_days));
        fields.insert(TOTAL_PRICE.to_string(), self.total_price.to_value());
        fields.insert(SQRT_TOTAL_PRICE.to_string(), float_value(self.sqrt_total_price));
        fields.insert(UNIT_COST.to_string(), float_value(self.unit_cost));
    }
}

fn float_value(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

/// Why a record was skipped by the deriver.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordIssue {
    /// The record value is not a JSON object.
    NotAnObject,
    /// A required field is absent.
    MissingField(&'static str),
    /// A date field is not a string in `mm/dd/yy` form.
    BadDate { field: &'static str, value: String },
    /// `rental_start` is after `rental_end`.
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    /// A numeric field holds something other than a finite number.
    NotNumeric { field: &'static str },
    ZeroUnits,
    /// `total_price` is negative, so it has no real square root.
    NegativeTotal(Amount),
    Overflow,
}

impl RecordIssue {
    /// Missing fields are reported separately from malformed ones.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, RecordIssue::MissingField(_))
    }
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIssue::NotAnObject => write!(f, "record is not an object"),
            RecordIssue::MissingField(name) => write!(f, "missing field `{name}`"),
            RecordIssue::BadDate { field, value } => {
                write!(f, "`{field}` value {value} does not match mm/dd/yy")
            }
            RecordIssue::StartAfterEnd { start, end } => {
                write!(f, "rental starts {start} after it ends {end}")
            }
            RecordIssue::NotNumeric { field } => write!(f, "`{field}` is not a number"),
            RecordIssue::ZeroUnits => write!(f, "`units_rented` is zero"),
            RecordIssue::NegativeTotal(total) => {
                write!(f, "total price {total} is negative")
            }
            RecordIssue::Overflow => write!(f, "total price overflows"),
        }
    }
}

/// A record the deriver left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub id: String,
    pub issue: RecordIssue,
}

/// Outcome of one pass of the deriver over a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivationReport {
    pub derived: Vec<String>,
    pub skipped: Vec<SkippedRecord>,
}

impl DerivationReport {
    pub fn records_seen(&self) -> usize {
        self.derived.len() + self.skipped.len()
    }
}

/// Kind-specific attributes of an inventory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Plain,
    Furniture { material: String, size: String },
    ElectricAppliance { brand: String, voltage: String },
}

/// One entry of the in-memory inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub product_code: String,
    pub description: String,
    pub market_price: u32,
    pub rental_price: String,
    pub kind: ItemKind,
}

impl InventoryItem {
    /// Field name/value pairs in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("product_code", self.product_code.clone()),
            ("description", self.description.clone()),
            ("market_price", self.market_price.to_string()),
            ("rental_price", self.rental_price.clone()),
        ];
        match &self.kind {
            ItemKind::Plain => {}
            ItemKind::Furniture { material, size } => {
                out.push(("material", material.clone()));
                out.push(("size", size.clone()));
            }
            ItemKind::ElectricAppliance { brand, voltage } => {
                out.push(("brand", brand.clone()));
                out.push(("voltage", voltage.clone()));
            }
        }
        out
    }
}
