//! CLI module for the issuance driver

pub mod commands;

pub use commands::{AppState, CliResult};
