// SPDX-License-Identifier: PMPL-1.0-or-later
//! Built-in JSON reporter for programmatic consumption.

use crate::reporter::Reporter;
use crate::results::TestResult;

/// Emits the raw result batch as pretty-printed JSON on stdout and keeps
/// everything else off that stream.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn begin(&self, _url: &str) {}

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }

    fn results(&self, results: &[TestResult], _url: &str) {
        match serde_json::to_string_pretty(results) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to serialize results: {e}"),
        }
    }

    fn debug(&self, message: &str) {
        eprintln!("{message}");
    }
}
