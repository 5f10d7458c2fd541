use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_config(dir: &tempfile::TempDir, toml: &str) -> PathBuf {
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["check", "--simulate"], 0, "check ok", "stdout")]
#[case(&["watch", "--simulate", "--max-ticks", "3", "--period-ms", "10"], 0, "upper", "stdout")]
// With no arm on the network, watch still publishes frames; they are just
// flagged degraded.
#[case(&["watch", "--max-ticks", "2", "--period-ms", "10"], 0, "LINK?", "stdout")]
#[case(&["bogus"], 2, "unrecognized", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let mut cmd = Command::cargo_bin("arm_cli").unwrap();
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert();
    let assert = if exit_code >= 0 {
        assert.code(exit_code)
    } else {
        assert.failure()
    };

    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn watch_with_start_reaches_running() {
    // Simulated sensors open at the calibration midpoint, so the attempt
    // starts on the first healthy tick.
    Command::cargo_bin("arm_cli")
        .unwrap()
        .args([
            "watch",
            "--simulate",
            "--start",
            "--max-ticks",
            "20",
            "--period-ms",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("running"));
}

#[test]
fn invalid_config_is_rejected_with_the_offending_key() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "[poll]\nperiod_ms = 0\n");
    Command::cargo_bin("arm_cli")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .args(["watch", "--simulate", "--max-ticks", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll.period_ms"));
}

#[test]
fn malformed_toml_is_rejected() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "not really toml [");
    Command::cargo_bin("arm_cli")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .args(["check", "--simulate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}

#[test]
fn config_thresholds_flow_through_to_validation() {
    let dir = tempdir().unwrap();
    let cfg = write_config(&dir, "[thresholds]\nwarning_deg = 20\nfailure_deg = 10\n");
    Command::cargo_bin("arm_cli")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .args(["watch", "--simulate", "--max-ticks", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("warning_deg"));
}
