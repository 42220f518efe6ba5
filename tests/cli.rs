// SPDX-License-Identifier: PMPL-1.0-or-later
//! End-to-end tests for the a11ycheck binary.
//!
//! Engine runs are exercised through a stub engine script written into a
//! temp directory, so no browser or real engine is required.

use assert_cmd::Command;
use predicates::str::contains;
use std::path::{Path, PathBuf};

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("a11ycheck").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn environment_flag_prints_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("--environment")
        .assert()
        .success()
        .stdout(contains("a11ycheck: "));
}

#[test]
fn missing_url_shows_help_and_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .assert()
        .code(1)
        .stdout(contains("Usage"));
}

#[test]
fn unknown_reporter_exits_one_naming_it() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["-r", "xml", "https://example.com/"])
        .assert()
        .code(1)
        .stderr(contains("xml"));
}

#[test]
fn missing_engine_is_an_operational_failure() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["-e", "/nonexistent/engine", "https://example.com/"])
        .assert()
        .code(1)
        .stderr(contains("failed to launch engine"));
}

#[cfg(unix)]
mod with_stub_engine {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn stub_engine(dir: &Path, results_json: &str) -> PathBuf {
        let path = dir.join("stub-engine");
        std::fs::write(
            &path,
            format!("#!/bin/sh\ncat >/dev/null\necho '{results_json}'\n"),
        )
        .unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    const TWO_ERRORS: &str = r#"[{"type":"error","code":"H37","message":"missing alt"},{"type":"error","code":"H57","message":"missing lang"}]"#;

    #[test]
    fn clean_page_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let engine = stub_engine(dir.path(), "[]");
        cmd(dir.path())
            .args(["-e", engine.to_str().unwrap(), "https://example.com/"])
            .assert()
            .success()
            .stdout(contains("No issues found"));
    }

    #[test]
    fn results_within_threshold_exit_zero() {
        let dir = tempfile::tempdir().unwrap();
        let engine = stub_engine(dir.path(), TWO_ERRORS);
        cmd(dir.path())
            .args([
                "-e",
                engine.to_str().unwrap(),
                "-T",
                "2",
                "https://example.com/",
            ])
            .assert()
            .success()
            .stdout(contains("2 error(s)"));
    }

    #[test]
    fn results_over_threshold_exit_two_after_reporting() {
        let dir = tempfile::tempdir().unwrap();
        let engine = stub_engine(dir.path(), TWO_ERRORS);
        cmd(dir.path())
            .args([
                "-e",
                engine.to_str().unwrap(),
                "-T",
                "1",
                "https://example.com/",
            ])
            .assert()
            .code(2)
            // Reporter output still lands before the non-zero exit.
            .stdout(contains("2 error(s)"));
    }

    #[test]
    fn level_none_never_fails() {
        let dir = tempfile::tempdir().unwrap();
        let engine = stub_engine(dir.path(), TWO_ERRORS);
        cmd(dir.path())
            .args([
                "-e",
                engine.to_str().unwrap(),
                "-l",
                "none",
                "https://example.com/",
            ])
            .assert()
            .success();
    }

    #[test]
    fn json_reporter_emits_parsable_results() {
        let dir = tempfile::tempdir().unwrap();
        let engine = stub_engine(dir.path(), TWO_ERRORS);
        let output = cmd(dir.path())
            .args([
                "-e",
                engine.to_str().unwrap(),
                "-r",
                "json",
                "-l",
                "none",
                "https://example.com/",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["code"], "H37");
    }

    #[test]
    fn config_file_threshold_is_overridden_by_flag() {
        let dir = tempfile::tempdir().unwrap();
        let engine = stub_engine(dir.path(), TWO_ERRORS);
        std::fs::write(dir.path().join("a11ycheck.json"), r#"{"threshold": 5}"#).unwrap();

        // File threshold 5 absorbs both errors.
        cmd(dir.path())
            .args(["-e", engine.to_str().unwrap(), "https://example.com/"])
            .assert()
            .success();

        // CLI flag tightens it back down.
        cmd(dir.path())
            .args([
                "-e",
                engine.to_str().unwrap(),
                "-T",
                "0",
                "https://example.com/",
            ])
            .assert()
            .code(2);
    }

    #[test]
    fn incompatible_local_reporter_exits_one_with_range() {
        let dir = tempfile::tempdir().unwrap();
        let engine = stub_engine(dir.path(), "[]");
        let reporter = dir.path().join("picky");
        std::fs::write(
            &reporter,
            "#!/bin/sh\nif [ \"$1\" = supports ]; then echo '>=99.0.0'; fi\n",
        )
        .unwrap();
        let mut perms = std::fs::metadata(&reporter).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&reporter, perms).unwrap();

        cmd(dir.path())
            .args([
                "-e",
                engine.to_str().unwrap(),
                "-r",
                "picky",
                "https://example.com/",
            ])
            .assert()
            .code(1)
            .stderr(contains(">=99.0.0"));
    }
}
