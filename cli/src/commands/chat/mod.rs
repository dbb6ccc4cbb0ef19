//! # Parley Interactive Chat
//!
//! File: cli/src/commands/chat/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `parley chat` opens a conversation with a persona over stdin/stdout. Each line
//! typed is submitted to the conversation; the persona "types" for a moment and
//! then answers. Lines starting with `/` are session commands:
//!
//! - `/clear`: start over from the greeting
//! - `/export`: save the transcript to the export directory
//! - `/history`: print the transcript
//! - `/help`: list the commands
//! - `/quit` or `/exit`: leave (end of input works too)
//!
//! ## Examples
//!
//! ```bash
//! # Chat with the default persona
//! parley chat
//!
//! # Chat with Ona, reproducibly, saving exports under ~/chat-logs
//! parley chat --persona ona --seed 7 --export-dir ~/chat-logs
//!
//! # Scripted session without the typing pause
//! printf 'hello\n/export\n' | parley chat --no-delay
//! ```
//!
use crate::commands::options::SessionOptions;
use crate::core::config;
use crate::core::error::Result;
use crate::engine::controller::{seeded_rng, ConversationController};
use crate::engine::persona::DelayRange;
use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::io::{self, BufReader};
use tracing::info;

/// Runs the line-oriented chat loop.
pub mod session;

/// # Chat Command Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub session: SessionOptions,

    /// Reply immediately instead of simulating typing.
    #[arg(long)]
    pub no_delay: bool,

    /// Directory for `/export`. Overrides `[export] directory` from configuration.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Loads configuration, resolves the persona, and runs the session on the
/// process's stdin/stdout until the user quits or input ends.
pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);

    let cfg = config::load_config().context("Failed to load Parley configuration")?;
    let resolved = args.session.resolve(&cfg)?;
    let delay = if args.no_delay {
        DelayRange::immediate()
    } else {
        resolved.delay
    };
    let export_dir = args.export_dir.unwrap_or_else(|| cfg.export_dir());

    let mut controller =
        ConversationController::new(resolved.persona, seeded_rng(resolved.seed)).with_delay(delay);

    let interactive = std::io::stdin().is_terminal();
    let mut stdout = io::stdout();
    session::run(
        &mut controller,
        BufReader::new(io::stdin()),
        &mut stdout,
        &session::SessionSettings {
            export_dir,
            interactive,
        },
    )
    .await
}
