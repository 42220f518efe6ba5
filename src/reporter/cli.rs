// SPDX-License-Identifier: PMPL-1.0-or-later
//! Built-in human-readable reporter.

use crate::reporter::Reporter;
use crate::results::{Severity, TestResult};

/// Default reporter: a plain-text summary grouped by severity.
pub struct CliReporter;

impl CliReporter {
    fn render(results: &[TestResult], url: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("Results for {url}\n\n"));

        if results.is_empty() {
            output.push_str("No issues found.\n");
            return output;
        }

        let errors = results.iter().filter(|r| r.kind == Severity::Error).count();
        let warnings = results
            .iter()
            .filter(|r| r.kind == Severity::Warning)
            .count();
        let notices = results
            .iter()
            .filter(|r| r.kind == Severity::Notice)
            .count();

        for severity in &[Severity::Error, Severity::Warning, Severity::Notice] {
            let batch: Vec<&TestResult> =
                results.iter().filter(|r| r.kind == *severity).collect();
            if batch.is_empty() {
                continue;
            }
            output.push_str(&format!("--- {} ({}) ---\n", severity, batch.len()));
            for result in batch {
                output.push_str(&format!("[{}]\n  {}\n", result.code, result.message));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "Found {} issue(s): {} error(s), {} warning(s), {} notice(s)\n",
            results.len(),
            errors,
            warnings,
            notices
        ));
        output
    }
}

impl Reporter for CliReporter {
    fn begin(&self, url: &str) {
        println!("Testing {url}");
    }

    fn error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn results(&self, results: &[TestResult], url: &str) {
        print!("{}", Self::render(results, url));
    }

    fn debug(&self, message: &str) {
        eprintln!("Debug: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_run_renders_no_issues() {
        let output = CliReporter::render(&[], "https://example.com/");
        assert!(output.contains("Results for https://example.com/"));
        assert!(output.contains("No issues found"));
    }

    #[test]
    fn findings_are_grouped_and_counted() {
        let results = vec![
            TestResult::new(Severity::Error, "H37", "missing alt"),
            TestResult::new(Severity::Notice, "G90", "check reading order"),
            TestResult::new(Severity::Error, "H57", "missing lang"),
        ];
        let output = CliReporter::render(&results, "https://example.com/");
        assert!(output.contains("--- error (2) ---"));
        assert!(output.contains("--- notice (1) ---"));
        assert!(!output.contains("--- warning"));
        assert!(output.contains("Found 3 issue(s): 2 error(s), 0 warning(s), 1 notice(s)"));
        assert!(output.contains("[H37]"));
    }
}
