//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - builds the logger once, from the `--log` flag
//! - runs the chosen command inside that logger's scope

use std::io;

use clap::Parser;

use crate::cli::menu::MenuSession;
use crate::cli::{CalcArgs, Command, InventoryArgs, LogArgs};
use crate::domain::CalcConfig;
use crate::error::AppError;
use crate::logging::{LogConfig, Logger};

pub mod pipeline;

/// Entry point for the `charges` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is normal.
    let _ = dotenvy::dotenv();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Calc(args) => handle_calc(args),
        Command::Inventory(args) => handle_inventory(args),
    }
}

fn handle_calc(args: CalcArgs) -> Result<(), AppError> {
    let config = calc_config_from_args(&args);
    let logger = Logger::from_config(&log_config_from_args(&args.log))?;

    logger.scope(|| pipeline::run_calc(&config))?;
    Ok(())
}

fn handle_inventory(args: InventoryArgs) -> Result<(), AppError> {
    let logger = Logger::from_config(&log_config_from_args(&args.log))?;

    logger.scope(|| {
        let stdin = io::stdin();
        let mut session = MenuSession::new(stdin.lock(), io::stdout());
        session.run()
    })
}

pub fn calc_config_from_args(args: &CalcArgs) -> CalcConfig {
    CalcConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        export_csv: args.export_csv.clone(),
    }
}

pub fn log_config_from_args(args: &LogArgs) -> LogConfig {
    LogConfig {
        enabled: args.log,
        dir: args.log_dir.clone(),
    }
}

/// Options that take the next token as their value.
const VALUE_OPTIONS: [&str; 6] = ["-i", "--input", "-o", "--output", "--export-csv", "--log-dir"];

/// Rewrite argv so a bare flag list means `charges calc`.
///
/// Rules:
/// - `charges -i in.json -o out.json` -> `charges calc -i in.json -o out.json`
/// - `-log` (single dash) in flag position is accepted as `--log`; as the
///   value of a path option (`-o -log`) it is left alone
/// - `charges --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(argv: Vec<String>) -> Vec<String> {
    let mut rewritten: Vec<String> = Vec::with_capacity(argv.len() + 1);
    for arg in argv {
        let is_option_value = rewritten
            .last()
            .is_some_and(|prev| VALUE_OPTIONS.contains(&prev.as_str()));
        if arg == "-log" && !is_option_value {
            rewritten.push("--log".to_string());
        } else {
            rewritten.push(arg);
        }
    }
    let mut argv = rewritten;

    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // If the first token is a flag, treat it as "calc flags".
    if arg1.starts_with('-') {
        argv.insert(1, "calc".to_string());
    }

    argv
}
