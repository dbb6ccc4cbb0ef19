//! # Parley Reply Engine
//!
//! File: cli/src/engine/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything that makes up a chat session, independent of how it is presented:
//! - `message`: immutable chat messages
//! - `persona`: personas and their ordered keyword category tables
//! - `selector`: picks a reply for a line of input
//! - `conversation`: the ordered, never-empty message list
//! - `controller`: submit / delayed reply / clear / export for one session
//! - `transcript`: plain-text export of a conversation
//!
//! The command modules only talk to `controller`, `persona` and `selector`.
//!
pub mod controller;
pub mod conversation;
pub mod message;
pub mod persona;
pub mod selector;
pub mod transcript;
