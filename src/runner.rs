// SPDX-License-Identifier: PMPL-1.0-or-later
//! One test run, sequenced.
//!
//! The reporter is told the run is beginning immediately before the engine
//! is invoked, synchronously and regardless of outcome. On engine failure
//! the full diagnostic chain goes to the reporter and the run is an
//! operational failure; on success the outcome is evaluated first and the
//! result batch is handed to the reporter either way, so threshold failures
//! never suppress reporter output.

use crate::config::Options;
use crate::engine::Engine;
use crate::outcome::{should_fail, ExitStatus};
use crate::reporter::Reporter;

pub fn run_once(
    options: &Options,
    url: &str,
    reporter: &dyn Reporter,
    engine: &dyn Engine,
) -> ExitStatus {
    reporter.begin(url);

    match engine.run(url, options) {
        Err(err) => {
            reporter.error(&format!("{:#}", anyhow::Error::new(err)));
            ExitStatus::Failure
        }
        Ok(results) => {
            let status = if should_fail(options.level, &results, options.threshold) {
                ExitStatus::ThresholdExceeded
            } else {
                ExitStatus::Clean
            };
            reporter.results(&results, url);
            status
        }
    }
}
