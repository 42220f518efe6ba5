// SPDX-License-Identifier: PMPL-1.0-or-later
//! External reporter plugins.
//!
//! An external reporter is an executable resolved from PATH
//! (`a11ycheck-reporter-<name>`) or the working directory. The loader asks it
//! once for its supported tool-version range (`<cmd> supports`); afterwards
//! each reporter event is delivered as a subprocess invocation with a JSON
//! payload on stdin:
//!
//! ```text
//! <cmd> begin    {"url": "..."}
//! <cmd> error    {"message": "..."}
//! <cmd> results  {"url": "...", "results": [...]}
//! <cmd> debug    {"message": "..."}
//! ```
//!
//! Event delivery failures are logged and swallowed; a reporter that dies
//! mid-run must not take the test run down with it.

use crate::reporter::Reporter;
use crate::results::TestResult;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::warn;

pub struct ExternalReporter {
    name: String,
    command: PathBuf,
}

impl ExternalReporter {
    pub fn new(name: &str, command: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            command,
        }
    }

    /// Query the declared version-compatibility range. The first non-empty
    /// line of `<cmd> supports` on stdout is the range; no output, a failed
    /// invocation, or a non-zero exit all mean no declared range.
    pub fn supports(&self) -> Option<String> {
        let output = Command::new(&self.command).arg("supports").output().ok()?;
        if !output.status.success() {
            return None;
        }
        let range = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()?
            .trim()
            .to_string();
        if range.is_empty() {
            None
        } else {
            Some(range)
        }
    }

    fn send(&self, event: &str, payload: serde_json::Value) {
        let spawned = Command::new(&self.command)
            .arg(event)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                warn!("reporter {} failed to start for {}: {}", self.name, event, e);
                return;
            }
        };

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(payload.to_string().as_bytes()) {
                warn!("reporter {} rejected {} payload: {}", self.name, event, e);
            }
        }

        match child.wait() {
            Ok(status) if !status.success() => {
                warn!("reporter {} exited with {} on {}", self.name, status, event);
            }
            Err(e) => warn!("reporter {} wait failed on {}: {}", self.name, event, e),
            _ => {}
        }
    }
}

impl Reporter for ExternalReporter {
    fn begin(&self, url: &str) {
        self.send("begin", json!({ "url": url }));
    }

    fn error(&self, message: &str) {
        self.send("error", json!({ "message": message }));
    }

    fn results(&self, results: &[TestResult], url: &str) {
        self.send("results", json!({ "url": url, "results": results }));
    }

    fn debug(&self, message: &str) {
        self.send("debug", json!({ "message": message }));
    }
}
