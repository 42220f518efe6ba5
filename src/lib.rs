// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ycheck - accessibility test runner
//!
//! Configures and invokes an external accessibility-testing engine against a
//! single URL, then reports pass/fail based on a configurable severity
//! threshold. The engine itself (page rendering, rule evaluation) is an
//! opaque collaborator reached over a narrow subprocess interface; this crate
//! owns everything around it:
//!
//! - **config**: layered option resolution (defaults, config file, CLI flags)
//! - **reporter**: pluggable output reporters, resolved by name with a
//!   version-compatibility gate for external plugins
//! - **engine**: the subprocess invoker for the external test engine
//! - **outcome**: the pure severity-level/threshold pass-fail policy
//! - **environment**: the `--environment` diagnostic report

pub mod cli;
pub mod config;
pub mod engine;
pub mod environment;
pub mod outcome;
pub mod reporter;
pub mod results;
pub mod runner;
