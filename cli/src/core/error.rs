//! # Parley Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout Parley. Almost nothing in the
//! reply engine can fail: selecting a reply, clearing a conversation and rendering a
//! transcript are all total. Errors only show up at the edges of the program:
//! - Configuration files that cannot be read, parsed or validated
//! - Persona lookups and persona tables that do not make sense
//! - Writing an exported transcript to disk
//! - One-shot input that is empty
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ParleyError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if text.trim().is_empty() {
//!     return Err(ParleyError::EmptyInput.into());
//! }
//!
//! // Add context to errors using anyhow
//! fs::write(&path, contents)
//!     .with_context(|| format!("Failed to write transcript: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the Parley application.
#[derive(Error, Debug)]
pub enum ParleyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Persona '{name}' not found.")]
    UnknownPersona { name: String },

    #[error("Persona '{name}' is invalid: {reason}")]
    InvalidPersona { name: String, reason: String },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Input cannot be empty.")]
    EmptyInput,
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
