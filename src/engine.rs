// SPDX-License-Identifier: PMPL-1.0-or-later
//! External engine invoker.
//!
//! The accessibility test engine is an opaque collaborator: a subprocess
//! that receives a JSON run request on stdin and answers with a JSON array
//! of findings on stdout. Exactly one engine run happens per process
//! lifetime; the call is synchronous and is never retried.

use crate::config::Options;
use crate::results::TestResult;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

/// Default engine executable, looked up on PATH.
pub const DEFAULT_ENGINE: &str = "a11y-engine";

/// Engine failure. Always fatal; surfaced with full diagnostic detail.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to launch engine {path}: {source}")]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("engine produced invalid results: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}

/// The narrow interface the orchestrator sees. One run, one result batch.
pub trait Engine {
    fn run(&self, url: &str, options: &Options) -> Result<Vec<TestResult>, EngineError>;
}

/// Run request handed to the engine on stdin.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunRequest<'a> {
    url: &'a str,
    standard: &'a str,
    timeout: u64,
    wait: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    root_element: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hide_elements: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ignore: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verify_page: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    htmlcs: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    screen_capture: Option<&'a Path>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rules: Vec<&'a str>,
}

impl<'a> RunRequest<'a> {
    fn new(url: &'a str, options: &'a Options) -> Self {
        Self {
            url,
            standard: &options.standard,
            timeout: options.timeout,
            wait: options.wait,
            root_element: options.root_element.as_deref(),
            hide_elements: options.hide_elements.as_deref(),
            ignore: options.ignore.iter().map(String::as_str).collect(),
            verify_page: options.verify_page.as_deref(),
            port: options.port,
            htmlcs: options.htmlcs.as_deref(),
            screen_capture: options.screen_capture.as_deref(),
            rules: options.add_rule.iter().map(String::as_str).collect(),
        }
    }
}

/// Engine implementation that shells out to the configured executable.
pub struct ExternalEngine {
    path: PathBuf,
}

impl ExternalEngine {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Engine selected by the resolved options, or the PATH default.
    pub fn from_options(options: &Options) -> Self {
        Self::new(
            options
                .engine_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENGINE)),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Engine for ExternalEngine {
    fn run(&self, url: &str, options: &Options) -> Result<Vec<TestResult>, EngineError> {
        let request = serde_json::to_vec(&RunRequest::new(url, options))?;
        debug!("running engine {} against {}", self.path.display(), url);

        let mut child = Command::new(&self.path)
            .arg("run")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                path: self.path.clone(),
                source,
            })?;

        // stdin is piped, so take() always succeeds here.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&request)?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let results: Vec<TestResult> = serde_json::from_slice(&output.stdout)?;
        debug!("engine returned {} results", results.len());
        Ok(results)
    }
}

/// Probe an executable's `--version` output, for the environment report.
pub fn probe_version(path: &Path) -> Option<String> {
    let output = Command::new(path).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let line = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()?
        .trim()
        .to_string();
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}
