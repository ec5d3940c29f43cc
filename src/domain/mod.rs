//! Domain types used throughout the tool.
//!
//! This module defines:
//!
//! - the rental batch and its field names (`RentalBatch`, `RENTAL_START`, ...)
//! - typed views used by the deriver (`RentalTerms`, `DerivedCharges`, `Amount`)
//! - per-record outcomes (`RecordIssue`, `DerivationReport`)
//! - inventory items (`InventoryItem`, `ItemKind`)

pub mod types;

pub use types::*;
