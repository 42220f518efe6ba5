// SPDX-License-Identifier: PMPL-1.0-or-later
//! Reporter loading and the reporter capability surface.
//!
//! A reporter is resolved by name once per run, through an explicit ordered
//! chain of resolver strategies; the first hit wins and later strategies are
//! never attempted:
//!
//! 1. built-in reporters (`cli`, `json`)
//! 2. an installed executable named `a11ycheck-reporter-<name>` on PATH
//! 3. an executable file named `<name>` in the working directory
//!
//! External reporters may declare a semver range of supported tool versions
//! via the `supports` handshake; a declared range that excludes the running
//! version is fatal. A reporter declaring no range is always accepted.

mod cli;
mod external;
mod json;

pub use cli::CliReporter;
pub use external::ExternalReporter;
pub use json::JsonReporter;

use crate::environment::BuildInfo;
use crate::results::TestResult;
use semver::{Version, VersionReq};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Prefix for installed reporter executables.
pub const INSTALLED_PREFIX: &str = "a11ycheck-reporter-";

/// Output capability set every reporter provides.
pub trait Reporter {
    /// The run is starting against the given URL.
    fn begin(&self, url: &str);
    /// A fatal message, before the process exits non-zero.
    fn error(&self, message: &str);
    /// The full result batch for the run.
    fn results(&self, results: &[TestResult], url: &str);
    /// Debug chatter; replaced with a no-op when debug is disabled.
    fn debug(&self, message: &str);
}

/// Fatal reporter-loading failures. Both exit the process with code 1.
#[derive(Error, Debug)]
pub enum ReporterError {
    #[error("reporter \"{0}\" could not be loaded")]
    NotFound(String),

    #[error("reporter \"{name}\" does not support a11ycheck {running} (requires {required})")]
    Incompatible {
        name: String,
        required: String,
        running: String,
    },
}

impl ReporterError {
    /// The user-facing stderr diagnostic. Incompatibility produces the
    /// four-line form: reporter name, explanatory note, the declared range,
    /// the running version.
    pub fn diagnostic(&self) -> String {
        match self {
            ReporterError::NotFound(name) => {
                format!("Reporter \"{name}\" could not be loaded")
            }
            ReporterError::Incompatible {
                name,
                required,
                running,
            } => format!(
                "Error loading reporter \"{name}\"\n\
                 This reporter does not support the running version of a11ycheck\n\
                 Reporter supports: {required}\n\
                 a11ycheck version: {running}"
            ),
        }
    }
}

impl std::fmt::Debug for dyn Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Reporter")
    }
}

/// A resolved reporter candidate, before the compatibility gate.
enum Resolved {
    Builtin(Box<dyn Reporter>),
    External(ExternalReporter),
}

/// Walk the strategy chain; the first `Some` wins and later strategies are
/// not attempted.
fn resolve_first<R>(name: &str, strategies: &[&dyn Fn(&str) -> Option<R>]) -> Option<R> {
    strategies.iter().find_map(|strategy| strategy(name))
}

fn resolve_builtin(name: &str) -> Option<Resolved> {
    match name {
        "cli" => Some(Resolved::Builtin(Box::new(CliReporter))),
        "json" => Some(Resolved::Builtin(Box::new(JsonReporter))),
        _ => None,
    }
}

fn resolve_installed(name: &str) -> Option<Resolved> {
    let program = format!("{INSTALLED_PREFIX}{name}");
    let command = find_on_path(&program)?;
    debug!("resolved reporter {} from PATH: {}", name, command.display());
    Some(Resolved::External(ExternalReporter::new(name, command)))
}

fn resolve_local(name: &str, cwd: &Path) -> Option<Resolved> {
    let candidate = cwd.join(name);
    if !candidate.is_file() {
        return None;
    }
    debug!("resolved reporter {} from {}", name, candidate.display());
    Some(Resolved::External(ExternalReporter::new(name, candidate)))
}

fn find_on_path(program: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Whether a declared range accepts the running version. An unparsable range
/// or version never matches.
fn compatible(required: &str, running: &str) -> bool {
    match (VersionReq::parse(required), Version::parse(running)) {
        (Ok(req), Ok(version)) => req.matches(&version),
        _ => false,
    }
}

/// Resolve a ready-to-use reporter, or fail with a loadable diagnostic.
///
/// When debug is disabled the resolved reporter is wrapped so its debug
/// capability is a no-op; everything else passes through unchanged.
pub fn load(
    name: &str,
    build: &BuildInfo,
    debug_enabled: bool,
) -> Result<Box<dyn Reporter>, ReporterError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let local = |n: &str| resolve_local(n, &cwd);
    let strategies: [&dyn Fn(&str) -> Option<Resolved>; 3] =
        [&resolve_builtin, &resolve_installed, &local];

    let resolved = resolve_first(name, &strategies)
        .ok_or_else(|| ReporterError::NotFound(name.to_string()))?;

    let reporter: Box<dyn Reporter> = match resolved {
        Resolved::Builtin(reporter) => reporter,
        Resolved::External(external) => {
            if let Some(required) = external.supports() {
                if !compatible(&required, build.version) {
                    return Err(ReporterError::Incompatible {
                        name: name.to_string(),
                        required,
                        running: build.version.to_string(),
                    });
                }
            }
            Box::new(external)
        }
    };

    Ok(if debug_enabled {
        reporter
    } else {
        Box::new(NoDebug(reporter))
    })
}

/// Wrapper that silences the debug capability when debug is disabled.
struct NoDebug(Box<dyn Reporter>);

impl Reporter for NoDebug {
    fn begin(&self, url: &str) {
        self.0.begin(url);
    }

    fn error(&self, message: &str) {
        self.0.error(message);
    }

    fn results(&self, results: &[TestResult], url: &str) {
        self.0.results(results, url);
    }

    fn debug(&self, _message: &str) {}
}
