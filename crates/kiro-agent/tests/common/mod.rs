//! Shared helpers for integration tests
//!
//! Each test stands in for kiro-cli with a small shell script and points the
//! SDK at it via `cli_path`.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// Write an executable stand-in for kiro-cli and return its path
pub fn fake_cli(dir: &TempDir, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("kiro-cli");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();

    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();

    path
}

/// Shell line printing one assistant message with the given text
pub fn assistant_line(text: &str) -> String {
    format!(
        r#"printf '%s\n' '{{"role":"assistant","content":[{{"type":"text","text":"{text}"}}]}}'"#
    )
}

/// A child that answers every request line with one "ack" message
pub fn responder_body() -> String {
    format!("while read line; do\n  {}\ndone", assistant_line("ack"))
}
