//! # Test Utilities for vpp-trace
//!
//! Helpers for driving the built `vpp-trace` binary with fixture dumps,
//! either piped on stdin or written to a temporary file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Path to the fixture directory shipped with the tests.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Read a fixture dump into memory.
pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("Failed to read fixture")
}

/// Command for the `vpp-trace` binary with logging disabled.
pub fn vpp_trace_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vpp-trace"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run `vpp-trace` with `input` piped to stdin.
pub fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = vpp_trace_cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn vpp-trace");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .expect("Failed to write to stdin");

    child.wait_with_output().expect("Failed to read output")
}

/// A dump written to a temporary directory that is removed on drop.
pub struct TempDump {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDump {
    pub fn new(content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("trace.txt");
        std::fs::write(&path, content).expect("Failed to write dump");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &str {
        self.path.to_str().unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
