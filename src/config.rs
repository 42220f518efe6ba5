// SPDX-License-Identifier: PMPL-1.0-or-later
//! Layered configuration resolution.
//!
//! Builds one immutable [`Options`] record per run by merging, in increasing
//! priority: built-in defaults, an optional config file (JSON or TOML), and
//! CLI flags. The file config carries optional nested `page` and `engine`
//! tables whose fields sit between the defaults and the file's own top-level
//! fields; arrays and scalars from a higher-priority source replace lower
//! values outright.
//!
//! A missing or unparsable config file is not an error - the loader falls
//! through its candidate paths and ends on an empty file config.

use crate::cli::Cli;
use crate::outcome::Level;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved options for one run. Assembled once, immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Accessibility standard to test against.
    pub standard: String,
    /// Reporter handle, resolved by the reporter loader.
    pub reporter: String,
    /// Severity level that counts toward the threshold.
    pub level: Level,
    /// Number of qualifying findings permitted before failure.
    pub threshold: u64,
    /// Rule codes excluded from testing.
    pub ignore: Vec<String>,
    /// Selector restricting testing to a subtree of the page.
    pub root_element: Option<String>,
    /// Selector for elements hidden from testing.
    pub hide_elements: Option<String>,
    /// Page load timeout in milliseconds.
    pub timeout: u64,
    /// Post-load settle time in milliseconds.
    pub wait: u64,
    /// String the page source must contain before testing proceeds.
    pub verify_page: Option<String>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Browser engine executable override.
    pub engine_path: Option<PathBuf>,
    /// URL or path of the HTML CodeSniffer bundle to inject.
    pub htmlcs: Option<String>,
    /// Port for the browser engine.
    pub port: Option<u16>,
    /// Screen capture output path.
    pub screen_capture: Option<PathBuf>,
    /// Extra rule codes added to the standard.
    pub add_rule: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            standard: "WCAG2AA".to_string(),
            reporter: "cli".to_string(),
            level: Level::Error,
            threshold: 0,
            ignore: Vec::new(),
            root_element: None,
            hide_elements: None,
            timeout: 30_000,
            wait: 0,
            verify_page: None,
            debug: false,
            engine_path: None,
            htmlcs: None,
            port: None,
            screen_capture: None,
            add_rule: Vec::new(),
        }
    }
}

/// Partial options as read from a config file. Every field is optional so
/// that absent fields never shadow lower-priority values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub standard: Option<String>,
    pub reporter: Option<String>,
    pub level: Option<String>,
    pub threshold: Option<u64>,
    pub ignore: Option<Vec<String>>,
    #[serde(alias = "root_element")]
    pub root_element: Option<String>,
    #[serde(alias = "hide_elements")]
    pub hide_elements: Option<String>,
    pub timeout: Option<u64>,
    pub wait: Option<u64>,
    #[serde(alias = "verify_page")]
    pub verify_page: Option<String>,
    pub debug: Option<bool>,
    pub htmlcs: Option<String>,
    pub port: Option<u16>,
    #[serde(alias = "screen_capture")]
    pub screen_capture: Option<PathBuf>,
    #[serde(alias = "add_rule")]
    pub add_rule: Option<Vec<String>>,
    #[serde(alias = "engine_path")]
    pub engine_path: Option<PathBuf>,
    /// Nested page settings, lower priority than the top-level fields.
    pub page: PageConfig,
    /// Nested browser-engine settings, lower priority than the top-level
    /// fields.
    pub engine: EngineConfig,
}

/// Nested page settings table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    #[serde(alias = "root_element")]
    pub root_element: Option<String>,
    #[serde(alias = "hide_elements")]
    pub hide_elements: Option<String>,
    pub timeout: Option<u64>,
    pub wait: Option<u64>,
    #[serde(alias = "verify_page")]
    pub verify_page: Option<String>,
}

/// Nested browser-engine settings table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub path: Option<PathBuf>,
    pub port: Option<u16>,
    pub htmlcs: Option<String>,
    #[serde(alias = "screen_capture")]
    pub screen_capture: Option<PathBuf>,
}

impl FileConfig {
    /// Collapse the nested `page`/`engine` tables into the top-level fields,
    /// with top-level fields winning. This realizes the deep-merge priority
    /// order: defaults < nested tables < top-level file fields.
    pub fn flattened(self) -> FileConfig {
        let FileConfig {
            page, engine, ..
        } = self.clone();
        FileConfig {
            root_element: self.root_element.or(page.root_element),
            hide_elements: self.hide_elements.or(page.hide_elements),
            timeout: self.timeout.or(page.timeout),
            wait: self.wait.or(page.wait),
            verify_page: self.verify_page.or(page.verify_page),
            engine_path: self.engine_path.or(engine.path),
            port: self.port.or(engine.port),
            htmlcs: self.htmlcs.or(engine.htmlcs),
            screen_capture: self.screen_capture.or(engine.screen_capture),
            page: PageConfig::default(),
            engine: EngineConfig::default(),
            standard: self.standard,
            reporter: self.reporter,
            level: self.level,
            threshold: self.threshold,
            ignore: self.ignore,
            debug: self.debug,
            add_rule: self.add_rule,
        }
    }
}

impl Options {
    /// Resolve the final options from a config-file path and parsed CLI
    /// flags. Config-file absence is silently absorbed; the CLI always wins
    /// field-by-field.
    pub fn resolve(config_path: &str, cli: &Cli) -> Options {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let file = load_file_config(config_path, &cwd).flattened();
        Options::default().merge_file(file).merge_cli(cli)
    }

    /// Overlay a (flattened) file config. Present fields replace the current
    /// value outright; absent fields leave it untouched.
    pub fn merge_file(mut self, file: FileConfig) -> Options {
        if let Some(standard) = file.standard {
            self.standard = standard;
        }
        if let Some(reporter) = file.reporter {
            self.reporter = reporter;
        }
        if let Some(level) = file.level {
            self.level = Level::from_name(&level);
        }
        if let Some(threshold) = file.threshold {
            self.threshold = threshold;
        }
        if let Some(ignore) = file.ignore {
            self.ignore = ignore;
        }
        if let Some(root_element) = file.root_element {
            self.root_element = Some(root_element);
        }
        if let Some(hide_elements) = file.hide_elements {
            self.hide_elements = Some(hide_elements);
        }
        if let Some(timeout) = file.timeout {
            self.timeout = timeout;
        }
        if let Some(wait) = file.wait {
            self.wait = wait;
        }
        if let Some(verify_page) = file.verify_page {
            self.verify_page = Some(verify_page);
        }
        if let Some(debug) = file.debug {
            self.debug = debug;
        }
        if let Some(engine_path) = file.engine_path {
            self.engine_path = Some(engine_path);
        }
        if let Some(htmlcs) = file.htmlcs {
            self.htmlcs = Some(htmlcs);
        }
        if let Some(port) = file.port {
            self.port = Some(port);
        }
        if let Some(screen_capture) = file.screen_capture {
            self.screen_capture = Some(screen_capture);
        }
        if let Some(add_rule) = file.add_rule {
            self.add_rule = add_rule;
        }
        self
    }

    /// Overlay CLI flags. Unset flags (None, empty repeatable lists, false
    /// booleans) leave the current value untouched.
    pub fn merge_cli(mut self, cli: &Cli) -> Options {
        if let Some(ref standard) = cli.standard {
            self.standard = standard.clone();
        }
        if let Some(ref reporter) = cli.reporter {
            self.reporter = reporter.clone();
        }
        if let Some(ref level) = cli.level {
            self.level = Level::from_name(level);
        }
        if let Some(threshold) = cli.threshold {
            self.threshold = threshold;
        }
        if !cli.ignore.is_empty() {
            self.ignore = cli.ignore.clone();
        }
        if let Some(ref root_element) = cli.root_element {
            self.root_element = Some(root_element.clone());
        }
        if let Some(ref hide_elements) = cli.hide_elements {
            self.hide_elements = Some(hide_elements.clone());
        }
        if let Some(timeout) = cli.timeout {
            self.timeout = timeout;
        }
        if let Some(wait) = cli.wait {
            self.wait = wait;
        }
        if let Some(ref verify_page) = cli.verify_page {
            self.verify_page = Some(verify_page.clone());
        }
        if cli.debug {
            self.debug = true;
        }
        if let Some(ref engine_path) = cli.engine_path {
            self.engine_path = Some(engine_path.clone());
        }
        if let Some(ref htmlcs) = cli.htmlcs {
            self.htmlcs = Some(htmlcs.clone());
        }
        if let Some(port) = cli.port {
            self.port = Some(port);
        }
        if let Some(ref screen_capture) = cli.screen_capture {
            self.screen_capture = Some(screen_capture.clone());
        }
        if !cli.add_rule.is_empty() {
            self.add_rule = cli.add_rule.clone();
        }
        self
    }
}

/// Candidate paths for the config file, tried in order: the literal path, a
/// leading `./` rewritten against the working directory, and the bare path
/// anchored at the working directory.
fn candidate_paths(path: &str, cwd: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(path)];
    if let Some(stripped) = path.strip_prefix("./") {
        candidates.push(cwd.join(stripped));
    }
    candidates.push(cwd.join(path));
    candidates
}

/// Load the first config-file candidate that reads and parses successfully.
/// Falls through failures silently; ends on an empty config.
pub fn load_file_config(path: &str, cwd: &Path) -> FileConfig {
    for candidate in candidate_paths(path, cwd) {
        let raw = match std::fs::read_to_string(&candidate) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("config candidate {} not readable: {}", candidate.display(), e);
                continue;
            }
        };
        match parse_file_config(&candidate, &raw) {
            Ok(config) => {
                debug!("loaded config from {}", candidate.display());
                return config;
            }
            Err(e) => {
                debug!("config candidate {} not parsable: {}", candidate.display(), e);
            }
        }
    }
    FileConfig::default()
}

fn parse_file_config(path: &Path, raw: &str) -> Result<FileConfig, String> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    } else {
        toml::from_str(raw).map_err(|e| e.to_string())
    }
}
