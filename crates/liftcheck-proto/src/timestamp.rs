//! `[<time>]` line framing.
//!
//! Times are non-negative decimals with at least one fractional digit. Spaces
//! inside the brackets are tolerated; the payload is trimmed.

use crate::errors::{ParseError, Result};

/// Split a line into its timestamp and payload.
///
/// # Errors
///
/// - `ParseError::MissingTimestamp` if the line does not open with a
///   well-formed bracketed decimal
pub fn split_timestamp(line: &str) -> Result<(f64, &str)> {
    let line = line.trim();
    let missing = || ParseError::MissingTimestamp(line.to_string());

    let rest = line.strip_prefix('[').ok_or_else(missing)?;
    let close = rest.find(']').ok_or_else(missing)?;
    let time = parse_decimal(rest[..close].trim()).ok_or_else(missing)?;

    Ok((time, rest[close + 1..].trim()))
}

/// Parse `<digits>.<digits>`.
///
/// Returns `None` for anything else, including exponents, signs and a
/// missing fractional part.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let (whole, frac) = s.split_once('.')?;
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !digits(frac) {
        return None;
    }
    s.parse().ok()
}

/// Render a timestamp the way the controller prints it.
pub fn format_timestamp(time: f64) -> String {
    format!("[{time:>8.4}]")
}
