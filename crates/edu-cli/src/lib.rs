//! edu-cli library
//!
//! Wiring from configuration to a ready [`edu_session::Session`], and the
//! command handlers the `edu` binary dispatches to.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;

pub use app::{build_session, execute};
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
