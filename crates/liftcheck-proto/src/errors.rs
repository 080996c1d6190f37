//! Parse errors for log lines.

use thiserror::Error;

/// Result alias for grammar operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors produced while parsing a single log line.
///
/// Every variant carries the offending text so the replay engine can quote it
/// in a malformed-input violation without re-reading the line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Line does not start with a `[<digits>.<digits>]` timestamp
    #[error("missing or invalid timestamp: '{0}'")]
    MissingTimestamp(String),

    /// Floor token is not `B<n>`/`F<n>` or names a floor outside the building
    #[error("invalid floor '{0}'")]
    InvalidFloor(String),

    /// Token that must be an unsigned integer or decimal is not one
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// Payload matches none of the known record shapes
    #[error("unrecognized format: '{0}'")]
    UnknownFormat(String),

    /// Field parsed but lies outside its allowed domain
    #[error("{field} out of range: {value}")]
    OutOfDomain {
        /// Name of the field
        field: &'static str,
        /// Rendered value that was rejected
        value: String,
    },
}

impl ParseError {
    pub(crate) fn out_of_domain(field: &'static str, value: impl ToString) -> Self {
        Self::OutOfDomain { field, value: value.to_string() }
    }
}
