//! `rental-charges` library crate.
//!
//! The binary (`charges`) is a thin wrapper around this library so that:
//!
//! - the charge derivation is testable without spawning processes
//! - the inventory menu can be driven from any reader/writer pair

pub mod app;
pub mod cli;
pub mod derive;
pub mod domain;
pub mod error;
pub mod inventory;
pub mod io;
pub mod logging;
