//! xenship CLI library
//!
//! Exposes the command surface, wiring and rendering for the `xenship` binary
//! and its tests.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod output;

#[cfg(test)]
mod tests;

pub use app::App;
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
