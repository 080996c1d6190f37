//! Verdict rendering, plain text or JSON.

use std::io::Write;

use liftcheck_core::{ActionCounters, Metrics, Report, Violation};
use serde::Serialize;

use crate::error::CliError;

/// Serializable summary of one run.
#[derive(Debug, Serialize)]
pub struct Verdict<'a> {
    /// Whether the logs conform
    pub passed: bool,
    /// Every violation, in detection order
    pub violations: &'a [Violation],
    /// Processed movement and door events
    pub counters: ActionCounters,
    /// Performance numbers, present only on pass with a known run time
    pub metrics: Option<Metrics>,
}

impl<'a> Verdict<'a> {
    /// Summarize a report. Metrics need the measured run time.
    pub fn new(report: &'a Report, elapsed: Option<f64>) -> Self {
        let metrics = elapsed.and_then(|elapsed| report.metrics(elapsed).ok());
        Self { passed: report.passed(), violations: report.violations(), counters: report.counters(), metrics }
    }
}

/// Write the verdict as human-readable lines.
pub fn write_text(out: &mut impl Write, verdict: &Verdict<'_>) -> Result<(), CliError> {
    if verdict.passed {
        writeln!(out, "PASS")?;
    } else {
        writeln!(out, "FAIL ({} violations)", verdict.violations.len())?;
        for violation in verdict.violations {
            writeln!(out, "{violation}")?;
        }
    }

    if let Some(metrics) = &verdict.metrics {
        writeln!(out, "T_run = {:.4}", metrics.makespan)?;
        writeln!(out, "WT    = {:.4}", metrics.weighted_completion_time)?;
        writeln!(out, "W     = {:.4}", metrics.weighted_action_count)?;
    }
    Ok(())
}

/// Write the verdict as one JSON document.
pub fn write_json(out: &mut impl Write, verdict: &Verdict<'_>) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, verdict)?;
    writeln!(out)?;
    Ok(())
}
