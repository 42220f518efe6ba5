// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ycheck entry point.
//!
//! Sequences one run: parse CLI, resolve options, load the reporter, invoke
//! the engine, evaluate the outcome, and exit with a code computed as data -
//! 0 clean, 1 operational failure, 2 content exceeded the threshold. Reporter
//! output is always emitted before the terminal exit.

use a11ycheck::cli::Cli;
use a11ycheck::config::Options;
use a11ycheck::engine::ExternalEngine;
use a11ycheck::environment::{self, BuildInfo};
use a11ycheck::outcome::ExitStatus;
use a11ycheck::reporter;
use a11ycheck::runner;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("a11ycheck=debug")
    } else {
        EnvFilter::new("a11ycheck=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    std::process::exit(run().code());
}

fn run() -> ExitStatus {
    let cli = Cli::parse();
    let build = BuildInfo::current();

    if cli.environment {
        let engine = ExternalEngine::from_options(&Options::resolve(&cli.config, &cli));
        print!("{}", environment::report(&build, engine.path()));
        return ExitStatus::Clean;
    }

    let Some(url) = cli.url.clone() else {
        // No URL to test: show help and stop before any engine work.
        let _ = Cli::command().print_help();
        return ExitStatus::Failure;
    };

    let options = Options::resolve(&cli.config, &cli);
    init_logging(options.debug);

    let reporter = match reporter::load(&options.reporter, &build, options.debug) {
        Ok(reporter) => reporter,
        Err(err) => {
            eprintln!("{}", err.diagnostic());
            return ExitStatus::Failure;
        }
    };

    reporter.debug(&format!("testing {url} against {}", options.standard));

    let engine = ExternalEngine::from_options(&options);
    runner::run_once(&options, &url, reporter.as_ref(), &engine)
}
