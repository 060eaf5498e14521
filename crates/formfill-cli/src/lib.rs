//! formfill CLI library.
//!
//! Argument parsing, configuration loading, and scratch-directory handling
//! for the `formfill` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod review;

pub use cli::Cli;
pub use error::{CliError, Result};
