// SPDX-License-Identifier: PMPL-1.0-or-later
//! Environment diagnostics for the `--environment` flag.
//!
//! Prints five fixed lines: tool version, runtime version, package-manager
//! version, browser-engine version, and the OS release/platform. Probes that
//! fail fall back to a sentinel instead of erroring.

use crate::engine;
use std::path::Path;
use std::process::Command;

/// Sentinel printed when a probe yields nothing.
pub const UNAVAILABLE: &str = "unavailable";

/// Build metadata injected at the entry point rather than read from ambient
/// globals, so the version under test is always explicit.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl BuildInfo {
    /// The values baked into this binary at compile time.
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// The five-line environment report.
pub fn report(build: &BuildInfo, engine_path: &Path) -> String {
    format!(
        "{}: {}\nrustc: {}\ncargo: {}\nengine: {}\nos: {}\n",
        build.name,
        build.version,
        probe_line("rustc"),
        probe_line("cargo"),
        engine::probe_version(engine_path).unwrap_or_else(|| UNAVAILABLE.to_string()),
        os_line(),
    )
}

/// First line of `<tool> --version`, or the sentinel.
fn probe_line(tool: &str) -> String {
    engine::probe_version(Path::new(tool)).unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// OS release plus platform, e.g. `6.1.0 linux x86_64`.
fn os_line() -> String {
    let release = Command::new("uname")
        .arg("-r")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| {
            let line = String::from_utf8_lossy(&o.stdout).trim().to_string();
            if line.is_empty() {
                None
            } else {
                Some(line)
            }
        })
        .unwrap_or_else(|| UNAVAILABLE.to_string());
    format!(
        "{} {} {}",
        release,
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
