// SPDX-License-Identifier: PMPL-1.0-or-later
//! Pass/fail decision policy.
//!
//! Maps the raw result batch to a process exit decision based on the
//! configured severity level and threshold. `should_fail` is pure; the exit
//! code itself is threaded through the orchestrator as a value rather than
//! being forced through process-lifecycle hooks.

use crate::results::{Severity, TestResult};
use serde::{Deserialize, Serialize};

/// Minimum severity that counts toward the pass/fail threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Never fail, regardless of findings.
    None,
    /// Every finding counts.
    Notice,
    /// Warnings and errors count.
    Warning,
    /// Only errors count.
    Error,
}

impl Level {
    /// Parse a level name permissively: unrecognized names fall back to
    /// `Error`, matching the strictest-by-default behaviour users rely on.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "none" => Level::None,
            "notice" => Level::Notice,
            "warning" => Level::Warning,
            _ => Level::Error,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::None => write!(f, "none"),
            Level::Notice => write!(f, "notice"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// Final exit decision for the process, computed as data and emitted once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Run completed and the page passed the threshold.
    Clean,
    /// Operational failure: bad reporter, engine error, unexpected exception.
    Failure,
    /// Run completed but the page exceeded the configured threshold.
    ThresholdExceeded,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::Failure => 1,
            ExitStatus::ThresholdExceeded => 2,
        }
    }
}

/// Whether the result batch exceeds the configured threshold at the given
/// level. The threshold is an exact count of excess findings permitted: a
/// qualifying count equal to the threshold passes, strictly greater fails.
pub fn should_fail(level: Level, results: &[TestResult], threshold: u64) -> bool {
    let qualifying = match level {
        Level::None => return false,
        Level::Notice => results.len() as u64,
        Level::Warning => results
            .iter()
            .filter(|r| matches!(r.kind, Severity::Error | Severity::Warning))
            .count() as u64,
        Level::Error => results
            .iter()
            .filter(|r| r.kind == Severity::Error)
            .count() as u64,
    };
    qualifying > threshold
}
