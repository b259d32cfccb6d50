// CLI module for wavify
//
// Argument parsing, console output and the per-command drivers. The codec in
// the library never prints; everything user-visible happens here.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Commands, Config};
pub use output::OutputFormatter;

use thiserror::Error;

// Error type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] wavify::WavError),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(String),

    #[error("{failed} of {total} files failed")]
    Failed { failed: usize, total: usize },

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}
