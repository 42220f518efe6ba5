// SPDX-License-Identifier: PMPL-1.0-or-later
//! CLI surface - clap-based argument parsing.
//!
//! All flags are optional; the only positional argument is the URL to test.
//! `--environment` bypasses everything else, so the URL requirement is
//! enforced by the orchestrator rather than by clap.

use clap::Parser;
use std::path::PathBuf;

/// a11ycheck - run accessibility tests against a URL
///
/// Invokes an external accessibility-testing engine against a single page
/// and exits non-zero when the findings exceed the configured severity
/// threshold.
#[derive(Parser, Debug)]
#[command(name = "a11ycheck")]
#[command(version)]
#[command(about = "Run accessibility tests against a URL")]
pub struct Cli {
    /// URL to test.
    pub url: Option<String>,

    /// Print environment diagnostics and exit.
    #[arg(short = 'n', long = "environment")]
    pub environment: bool,

    /// Accessibility standard to test against.
    #[arg(short, long)]
    pub standard: Option<String>,

    /// Reporter to use for output.
    #[arg(short, long)]
    pub reporter: Option<String>,

    /// Severity level that counts toward the threshold
    /// (none, notice, warning, error).
    #[arg(short, long)]
    pub level: Option<String>,

    /// Number of qualifying findings permitted before the run fails.
    #[arg(short = 'T', long)]
    pub threshold: Option<u64>,

    /// Rule codes to ignore (repeatable, semicolon-splittable).
    #[arg(short, long, value_delimiter = ';', action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Root element selector to restrict testing to.
    #[arg(short = 'R', long = "root-element")]
    pub root_element: Option<String>,

    /// Selector for elements to hide from testing.
    #[arg(short = 'E', long = "hide-elements")]
    pub hide_elements: Option<String>,

    /// Path to a JSON or TOML configuration file.
    #[arg(short, long, default_value = "./a11ycheck.json")]
    pub config: String,

    /// Port for the browser engine to listen on.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Page load timeout in milliseconds.
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Milliseconds to wait after load before testing.
    #[arg(short, long)]
    pub wait: Option<u64>,

    /// String the page source must contain before testing proceeds.
    #[arg(short = 'v', long = "verify-page")]
    pub verify_page: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,

    /// URL or path of the HTML CodeSniffer bundle to inject.
    #[arg(short = 'H', long)]
    pub htmlcs: Option<String>,

    /// Path to the browser engine executable.
    #[arg(short = 'e', long = "engine-path")]
    pub engine_path: Option<PathBuf>,

    /// Path to write a screen capture of the tested page to.
    #[arg(short = 'S', long = "screen-capture")]
    pub screen_capture: Option<PathBuf>,

    /// Extra rule codes to add to the standard (repeatable,
    /// semicolon-splittable).
    #[arg(short = 'A', long = "add-rule", value_delimiter = ';', action = clap::ArgAction::Append)]
    pub add_rule: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::parse_from(["a11ycheck", "https://example.com/"]);
        assert_eq!(cli.url.as_deref(), Some("https://example.com/"));
        assert_eq!(cli.config, "./a11ycheck.json");
        assert!(cli.reporter.is_none());
        assert!(!cli.environment);
        assert!(cli.ignore.is_empty());
    }

    #[test]
    fn url_is_optional_for_environment_flag() {
        let cli = Cli::parse_from(["a11ycheck", "--environment"]);
        assert!(cli.environment);
        assert!(cli.url.is_none());
    }

    #[test]
    fn ignore_accumulates_and_splits_on_semicolons() {
        let cli = Cli::parse_from([
            "a11ycheck",
            "-i",
            "WCAG2AA.1;WCAG2AA.2",
            "--ignore",
            "WCAG2AA.3",
            "https://example.com/",
        ]);
        assert_eq!(cli.ignore, vec!["WCAG2AA.1", "WCAG2AA.2", "WCAG2AA.3"]);
    }

    #[test]
    fn short_flags_map_to_expected_fields() {
        let cli = Cli::parse_from([
            "a11ycheck",
            "-s",
            "WCAG2AAA",
            "-r",
            "json",
            "-l",
            "warning",
            "-T",
            "3",
            "-R",
            "#main",
            "-E",
            ".ad",
            "-t",
            "5000",
            "-w",
            "250",
            "-d",
            "https://example.com/",
        ]);
        assert_eq!(cli.standard.as_deref(), Some("WCAG2AAA"));
        assert_eq!(cli.reporter.as_deref(), Some("json"));
        assert_eq!(cli.level.as_deref(), Some("warning"));
        assert_eq!(cli.threshold, Some(3));
        assert_eq!(cli.root_element.as_deref(), Some("#main"));
        assert_eq!(cli.hide_elements.as_deref(), Some(".ad"));
        assert_eq!(cli.timeout, Some(5000));
        assert_eq!(cli.wait, Some(250));
        assert!(cli.debug);
    }
}
