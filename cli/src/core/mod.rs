//! # Parley Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ParleyError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
