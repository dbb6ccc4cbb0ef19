//! # Parley Persona Commands
//!
//! File: cli/src/commands/persona/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Inspection commands for the personas Parley knows about, both built-in and
//! declared in configuration:
//! - `parley persona list`: one row per persona
//! - `parley persona info <NAME>`: the persona's settings and its ordered category table
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

/// Contains the handler and arguments for the `parley persona info` subcommand.
mod info;
/// Contains the handler and arguments for the `parley persona list` subcommand.
mod list;

/// # Persona Command Group Arguments (`PersonaArgs`)
#[derive(Parser, Debug)]
pub struct PersonaArgs {
    #[command(subcommand)]
    command: PersonaCommand,
}

/// # Persona Subcommands (`PersonaCommand`)
#[derive(Subcommand, Debug)]
enum PersonaCommand {
    /// Lists available personas.
    List(list::ListArgs),
    /// Shows a persona's settings and category table.
    Info(info::InfoArgs),
}

/// # Handle Persona Command (`handle_persona`)
///
/// Dispatches to the selected subcommand handler.
pub async fn handle_persona(args: PersonaArgs) -> Result<()> {
    match args.command {
        PersonaCommand::List(args) => list::handle_list(args).await?,
        PersonaCommand::Info(args) => info::handle_info(args).await?,
    }
    Ok(())
}
