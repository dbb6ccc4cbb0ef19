//! # Parley Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Parley CLI, a scripted
//! keyword-matching chat companion. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! - `engine`: the reply engine (personas, selector, conversation, controller, transcript)
//! - `commands`: one module per top-level command
//! - `core`: configuration and error types
//!
//! Logs go to stderr so chat output on stdout stays clean for piping.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! parley --help
//!
//! # Chat with more logging
//! parley -vv chat --persona ona
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Handles specific command logic (chat, ask, persona)
mod core; // Core infrastructure (errors, config)
mod engine; // Reply engine shared by the commands

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "parley",
    about = "Parley: a scripted chat companion for the terminal",
    long_about = "Chat with a rule-based persona that answers from keyword tables.\n\
                  Includes an interactive session, one-shot replies and transcript export.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Start an interactive chat session.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Print a single reply to a message.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Inspect available personas.
    #[command(alias = "p")]
    Persona(commands::persona::PersonaArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Ask(args) => commands::ask::handle_ask(args).await,
        Commands::Persona(args) => commands::persona::handle_persona(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
