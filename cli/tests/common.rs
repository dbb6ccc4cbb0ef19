//! # Parley CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`ask.rs`, `chat.rs`, ...). Every
//! integration test file in `cli/tests/` is compiled as its own crate and runs the
//! compiled `parley` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get Parley Command (`parley_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `parley` binary, isolated from
/// the host:
/// - runs in `workdir`, which gets a `.git` directory so the project config search
///   stops there instead of reaching `.parley.toml` files further up
/// - `HOME` and `XDG_CONFIG_HOME` point at `workdir`, so the user config is read
///   from there (see [`write_user_config`])
/// - the `PARLEY_*` variables and `RUST_LOG` are cleared
///
/// ## Panics
/// Panics if the `parley` binary cannot be found via `Command::cargo_bin`, or if the
/// `.git` marker cannot be created.
pub fn parley_cmd(workdir: &Path) -> Command {
    std::fs::create_dir_all(workdir.join(".git")).expect("Failed to create .git marker");
    let mut cmd = Command::cargo_bin("parley").expect("Failed to find parley binary for testing");
    cmd.current_dir(workdir)
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir)
        .env_remove("PARLEY_PERSONA")
        .env_remove("PARLEY_SEED")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes the user configuration that `parley_cmd(home)` picks up on Linux.
pub fn write_user_config(home: &Path, contents: &str) {
    let dir = home.join("parley");
    std::fs::create_dir_all(&dir).expect("Failed to create user config directory");
    std::fs::write(dir.join("config.toml"), contents).expect("Failed to write config.toml");
}

/// Writes a `.parley.toml` project configuration into `dir`.
pub fn write_project_config(dir: &Path, contents: &str) {
    std::fs::write(dir.join(".parley.toml"), contents).expect("Failed to write .parley.toml");
}
