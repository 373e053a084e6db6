//! Library surface of the GHG pathways CLI.
//!
//! The binary in `main.rs` is a thin argument-parsing shell; the command
//! handlers and CSV adapters live here so integration tests can drive them
//! directly.

pub mod commands;
pub mod error;
pub mod io;

pub use error::{exit_code, CliError};
