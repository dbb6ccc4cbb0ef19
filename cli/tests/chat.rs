//! # Parley CLI Chat Integration Tests
//!
//! File: cli/tests/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Integration tests for `parley chat`, driven through stdin. Most tests pass
//! `--no-delay` so they do not wait on the simulated typing.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_chat_scripted_session() {
    let temp = tempdir().unwrap();
    parley_cmd(temp.path())
        .args(["chat", "--no-delay", "--seed", "2"])
        .write_stdin("hello\nthank you\n/quit\n")
        .assert()
        .success()
        .stdout(
            "Bot: Hello! I'm your AI assistant. How can I help you today?\n\
             Bot: Hello! Nice to meet you. What would you like to talk about?\n\
             Bot: You're welcome! Is there anything else I can help you with?\n\
             Bot: Goodbye!\n",
        );
}

#[test]
fn test_chat_ona_persona() {
    let temp = tempdir().unwrap();
    parley_cmd(temp.path())
        .args(["chat", "--no-delay", "--persona", "ona"])
        .write_stdin("who are you?\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Ona: Hi, I'm Ona!"))
        .stdout(predicate::str::contains("Ona"));
}

#[test]
fn test_chat_export_to_directory() {
    let temp = tempdir().unwrap();
    let export_dir = temp.path().join("exports");
    parley_cmd(temp.path())
        .args(["chat", "--no-delay", "--export-dir"])
        .arg(&export_dir)
        .write_stdin("tell me a joke\n/export\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transcript saved to "));

    let files: Vec<_> = fs::read_dir(&export_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("chat-export-"), "{name}");
    assert!(name.ends_with(".txt"), "{name}");

    let contents = fs::read_to_string(&files[0]).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("] Bot: Hello! I'm your AI assistant."));
    assert!(lines[1].ends_with("] You: tell me a joke"));
    assert!(lines[2].contains("] Bot: Why"));
    assert!(!contents.ends_with('\n'));
}

#[test]
fn test_chat_export_directory_from_config() {
    let temp = tempdir().unwrap();
    write_project_config(temp.path(), "[export]\ndirectory = \"logs\"\n");
    parley_cmd(temp.path())
        .args(["chat", "--no-delay", "--persona", "ona"])
        .write_stdin("/export\n")
        .assert()
        .success();

    let files: Vec<_> = fs::read_dir(temp.path().join("logs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("ona-chat-export-"));
}

#[test]
fn test_chat_clear_restores_greeting() {
    let temp = tempdir().unwrap();
    parley_cmd(temp.path())
        .args(["chat", "--no-delay"])
        .write_stdin("hello\n/clear\n/history\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(conversation cleared)"))
        .stdout(
            predicate::str::is_match(
                r"\] Bot: Hello! I'm your AI assistant\. How can I help you today\?\n$",
            )
            .unwrap(),
        );
}

#[test]
fn test_chat_with_configured_delay_window() {
    let temp = tempdir().unwrap();
    write_project_config(temp.path(), "[delay]\nmin_ms = 5\nmax_ms = 20\n");
    parley_cmd(temp.path())
        .args(["chat"])
        .write_stdin("what's the weather?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bot: I don't have access to real-time weather data"));
}
