//! # Shared Session Options
//!
//! File: cli/src/commands/options.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `chat` and `ask` both need to know which persona to use and how to seed the
//! random source. `SessionOptions` holds those flags and `resolve` combines them
//! with the loaded configuration: flags (or their `PARLEY_*` environment variables)
//! win over configuration, which wins over built-in defaults.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine::persona::{DelayRange, Persona};
use clap::Args;
use std::sync::Arc;
use tracing::debug;

/// Flags shared by commands that talk to a persona.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionOptions {
    /// Persona to chat with (e.g. `assistant`, `ona`, or one defined in configuration).
    #[arg(long, short, env = "PARLEY_PERSONA")]
    pub persona: Option<String>,

    /// Seed for the random source, making replies reproducible.
    #[arg(long, env = "PARLEY_SEED")]
    pub seed: Option<u64>,
}

/// Everything needed to start a session, after flags and configuration are merged.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub persona: Arc<Persona>,
    pub seed: Option<u64>,
    pub delay: DelayRange,
}

impl SessionOptions {
    pub fn resolve(&self, config: &Config) -> Result<ResolvedSession> {
        let registry = config.persona_registry()?;
        let name = self.persona.as_deref().unwrap_or(config.persona_name());
        let persona = registry.get(name)?.clone();
        let delay = config.delay_for(&persona)?;
        let seed = self.seed.or(config.chat.seed);
        debug!(
            "Resolved persona '{}' (seed: {:?}, delay: {:?}..={:?})",
            persona.name,
            seed,
            delay.min(),
            delay.max()
        );
        Ok(ResolvedSession {
            persona: Arc::new(persona),
            seed,
            delay,
        })
    }
}
