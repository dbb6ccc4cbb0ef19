//! # Parley Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates all top-level commands of the Parley CLI so `main.rs`
//! can route to them.
//!
//! ## Command Groups
//!
//! - `chat`: Interactive conversation with a persona
//! - `ask`: A single reply, no typing delay
//! - `persona`: Inspect available personas (`list`, `info`)
//!
//! Each command defines its own arguments structure and handler function.
//! `options` holds the `--persona`/`--seed` flags shared by `chat` and `ask`.
//!

/// One-shot reply to a message given on the command line.
pub mod ask;
/// Interactive chat session over stdin/stdout.
pub mod chat;
/// Flags and resolution logic shared by `chat` and `ask`.
pub mod options;
/// Command group for inspecting personas. Includes subcommands `list` and `info`.
pub mod persona;
