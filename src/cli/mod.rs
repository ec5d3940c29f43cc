//! Command-line parsing for the rental charges tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! charge derivation and the inventory logic.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod menu;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "charges", version, about = "Rental charge calculator and inventory menu")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive rental charges for a JSON batch and write the result.
    Calc(CalcArgs),
    /// Launch the interactive inventory menu.
    Inventory(InventoryArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CalcArgs {
    /// Input JSON file of rental records.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: PathBuf,

    /// Output JSON file for the enriched records.
    #[arg(short = 'o', long, value_name = "JSON")]
    pub output: PathBuf,

    /// Export a per-record charge summary to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Args, Clone)]
pub struct InventoryArgs {
    #[command(flatten)]
    pub log: LogArgs,
}

/// Logging options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct LogArgs {
    /// Log errors, warnings and debug messages to the console and a dated file.
    #[arg(long)]
    pub log: bool,

    /// Directory for the dated log file.
    #[arg(long, env = "CHARGES_LOG_DIR", default_value = ".")]
    pub log_dir: PathBuf,
}
