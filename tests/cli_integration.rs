// CLI integration tests for the sanity probe binaries.
use std::process::{Command, Output};

use serde_json::Value;

fn linkprobe() -> Command {
    Command::new(env!("CARGO_BIN_EXE_linkprobe"))
}

fn quiet(mut cmd: Command) -> Output {
    cmd.env_remove("RUST_LOG").output().expect("spawn")
}

fn parse_json(output: &[u8]) -> Value {
    let text = std::str::from_utf8(output).expect("utf8");
    serde_json::from_str(text.trim()).expect("valid json")
}

#[test]
fn ares_sanity_exits_zero_without_output() {
    let output = quiet(Command::new(env!("CARGO_BIN_EXE_ares-sanity")));
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn zlib_sanity_exits_zero_without_output() {
    let output = quiet(Command::new(env!("CARGO_BIN_EXE_zlib-sanity")));
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn repeated_standalone_runs_stay_green() {
    for _ in 0..3 {
        let ares = quiet(Command::new(env!("CARGO_BIN_EXE_ares-sanity")));
        let zlib = quiet(Command::new(env!("CARGO_BIN_EXE_zlib-sanity")));
        assert!(ares.status.success());
        assert!(zlib.status.success());
    }
}

#[test]
fn all_probes_are_silent_on_success() {
    let mut cmd = linkprobe();
    cmd.args(["all", "--repeat", "2"]);
    let output = quiet(cmd);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn json_report_lists_each_run() {
    let mut cmd = linkprobe();
    cmd.args(["--format", "json", "--repeat", "2", "run", "zlib", "c-ares"]);
    let output = quiet(cmd);
    assert_eq!(output.status.code(), Some(0));

    let report = parse_json(&output.stdout);
    assert_eq!(report["ok"], true);
    assert!(report["time"].as_str().is_some());
    let probes = report["probes"].as_array().expect("probes array");
    let names: Vec<&str> = probes
        .iter()
        .map(|probe| probe["probe"].as_str().expect("probe name"))
        .collect();
    assert_eq!(names, ["zlib", "zlib", "c-ares", "c-ares"]);
    for probe in probes {
        assert_eq!(probe["ok"], true);
        assert_eq!(probe["status"], 0);
        assert!(probe.get("message").is_none());
    }
}

#[test]
fn unknown_probe_is_usage_error() {
    let mut cmd = linkprobe();
    cmd.args(["run", "openssl"]);
    let output = quiet(cmd);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown probe `openssl`"));
}

#[test]
fn bad_flag_is_usage_error() {
    let mut cmd = linkprobe();
    cmd.args(["all", "--repeat", "0"]);
    let output = quiet(cmd);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn oversized_repeat_is_usage_error() {
    let mut cmd = linkprobe();
    cmd.args(["--repeat", "4294967295", "all"]);
    let output = quiet(cmd);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn json_usage_error_goes_to_stderr() {
    let mut cmd = linkprobe();
    cmd.args(["--format", "json", "run", "lz4"]);
    let output = quiet(cmd);
    assert_eq!(output.status.code(), Some(2));
    let error = parse_json(&output.stderr);
    assert_eq!(error["error"]["kind"], "Usage");
}
