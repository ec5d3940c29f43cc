//! The charge calculation pipeline.
//!
//! load -> derive -> write (-> optional CSV export), run exactly once.
//!
//! Only a load failure stops the run. Bad records are skipped by the deriver
//! and a failed write is logged, so the caller always gets the batch back.

use tracing::{debug, error};

use crate::derive::derive_charges;
use crate::domain::{CalcConfig, DerivationReport, RentalBatch};
use crate::error::AppError;
use crate::io::{load_rentals, save_rentals, write_summary_csv};

/// All outputs of a single `charges calc` run.
#[derive(Debug, Clone)]
pub struct CalcOutput {
    pub batch: RentalBatch,
    pub report: DerivationReport,
    /// Whether the output JSON was written.
    pub written: bool,
}

pub fn run_calc(config: &CalcConfig) -> Result<CalcOutput, AppError> {
    // 1) Load. Fatal on failure.
    let mut batch = load_rentals(&config.input).inspect_err(|e| {
        error!("Input file error: {e}");
    })?;
    debug!(records = batch.len(), "Loaded rentals.");

    // 2) Derive per-record charges.
    let report = derive_charges(&mut batch);

    // 3) Write the whole batch back out.
    let written = match save_rentals(&config.output, &batch) {
        Ok(()) => true,
        Err(e) => {
            error!("{e}");
            false
        }
    };

    // 4) Optional summary export.
    if let Some(path) = &config.export_csv {
        write_summary_csv(path, &batch)?;
        debug!(path = %path.display(), "Wrote charge summary.");
    }

    Ok(CalcOutput {
        batch,
        report,
        written,
    })
}
