// SPDX-License-Identifier: PMPL-1.0-or-later
//! Result types shared between the engine invoker, the outcome evaluator,
//! and the reporters.

use serde::{Deserialize, Serialize};

/// Severity of a single finding as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Definite accessibility failure.
    Error,
    /// Likely issue that needs human review.
    Warning,
    /// Informational finding.
    Notice,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Notice => write!(f, "notice"),
        }
    }
}

/// One finding emitted by the engine.
///
/// Produced in a single batch per run and never mutated afterwards; consumed
/// once by the outcome evaluator and once by the reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Severity kind. Serialized as `type` on the engine wire format.
    #[serde(rename = "type")]
    pub kind: Severity,
    /// Rule identifier, e.g. `WCAG2AA.Principle1.Guideline1_1.1_1_1.H37`.
    pub code: String,
    /// Human-readable description of the finding.
    pub message: String,
}

impl TestResult {
    pub fn new(kind: Severity, code: &str, message: &str) -> Self {
        Self {
            kind,
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_wire_names_are_lowercase() {
        let result = TestResult::new(Severity::Warning, "WCAG2AA.1_4_3", "low contrast");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["code"], "WCAG2AA.1_4_3");
    }

    #[test]
    fn result_parses_from_engine_wire_format() {
        let raw = r#"{"type":"error","code":"H37","message":"Img element missing an alt attribute"}"#;
        let result: TestResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.kind, Severity::Error);
        assert_eq!(result.code, "H37");
    }
}
