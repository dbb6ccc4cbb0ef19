//! # Parley One-Shot Reply
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! `parley ask <TEXT>...` prints a single reply from the chosen persona with no
//! typing delay, which makes it handy for scripts and for checking how a persona's
//! category table handles a phrase.
//!
//! ```bash
//! parley ask --persona ona tell me a joke
//! parley ask --explain "hi there, what's the weather"
//! ```
//!
use crate::commands::options::SessionOptions;
use crate::core::config;
use crate::core::error::{ParleyError, Result};
use crate::engine::controller::seeded_rng;
use crate::engine::selector::ResponseSelector;
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// # Ask Command Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub session: SessionOptions,

    /// Also print which category matched (to stderr).
    #[arg(long)]
    pub explain: bool,

    /// The message to reply to. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// # Handle Ask Command (`handle_ask`)
///
/// Resolves the persona and prints one reply to stdout.
///
/// ## Errors
///
/// Returns `ParleyError::EmptyInput` when the message is only whitespace.
pub async fn handle_ask(args: AskArgs) -> Result<()> {
    info!("Handling ask command with args: {:?}", args);

    let text = args.text.join(" ");
    if text.trim().is_empty() {
        return Err(ParleyError::EmptyInput.into());
    }

    let cfg = config::load_config().context("Failed to load Parley configuration")?;
    let resolved = args.session.resolve(&cfg)?;
    let selector = ResponseSelector::new(resolved.persona);
    let mut rng = seeded_rng(resolved.seed);

    if args.explain {
        match selector.classify(&text) {
            Some(category) => eprintln!("category: {}", category.name),
            None => eprintln!("category: (fallback)"),
        }
    }
    println!("{}", selector.select(&text, &[], &mut rng));
    Ok(())
}
