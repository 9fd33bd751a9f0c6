//! Command-line front end: argument parsing, command handlers and report output.

pub mod commands;
pub mod stats;

pub use commands::run;
