//! Front-end failures. Rule violations are not errors; they are the verdict.

use std::path::PathBuf;

use thiserror::Error;

/// Why the checker could not produce a verdict.
#[derive(Error, Debug)]
pub enum CliError {
    /// A log file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path as given on the command line
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Both logs were requested from standard input.
    #[error("only one of --requests and --output may read stdin")]
    BothStdin,

    /// Writing the verdict failed.
    #[error("failed to write verdict: {0}")]
    Write(#[from] std::io::Error),

    /// JSON rendering failed.
    #[error("failed to encode verdict: {0}")]
    Json(#[from] serde_json::Error),
}
