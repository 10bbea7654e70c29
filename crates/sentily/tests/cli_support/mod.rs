#![allow(dead_code)]

use serde::de::DeserializeOwned;
use std::process::{Command, Output};

/// Run the `sentily` binary with `args` and extra environment variables.
///
/// `SENTILY_API_BASE` from the caller's environment is cleared so tests never
/// reach a real backend by accident.
pub fn run_cli(args: &[String], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sentily"));
    cmd.args(args).env_remove("SENTILY_API_BASE");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to run sentily binary")
}

pub fn assert_cli_success(output: &Output, args: &[String]) {
    assert!(
        output.status.success(),
        "sentily {:?} failed\nstdout:\n{}\nstderr:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Run, require success and parse stdout as JSON.
pub fn run_cli_json<T: DeserializeOwned>(args: &[String], envs: &[(&str, &str)]) -> T {
    let output = run_cli(args, envs);
    assert_cli_success(&output, args);
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout of sentily {:?} is not the expected JSON: {}\n{}",
            args,
            e,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

/// Run, require failure and parse the JSON error object from stdout.
pub fn run_cli_json_error(args: &[String], envs: &[(&str, &str)]) -> serde_json::Value {
    let output = run_cli(args, envs);
    assert!(
        !output.status.success(),
        "sentily {:?} unexpectedly succeeded:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout)
    );
    serde_json::from_slice(&output.stdout).expect("error output should be JSON")
}

pub fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
