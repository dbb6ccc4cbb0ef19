//! # Parley Persona Info
//!
//! File: cli/src/commands/persona/info.rs
//! Author: Christi Mahu
//!
//! Shows a persona's settings and its category table in priority order, so it is
//! easy to see why a given phrase lands in a given category.
//!
use crate::core::config;
use crate::core::error::Result;
use crate::engine::persona::Persona;
use anyhow::Context;
use clap::Parser;
use std::fmt::Write as _;
use tracing::info;

/// # Persona Info Arguments (`InfoArgs`)
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Name of the persona to describe.
    pub name: String,
}

/// # Handle Persona Info Command (`handle_info`)
pub async fn handle_info(args: InfoArgs) -> Result<()> {
    info!("Handling persona info command for '{}'", args.name);

    let cfg = config::load_config().context("Failed to load Parley configuration")?;
    let registry = cfg.persona_registry()?;
    let persona = registry.get(&args.name)?;
    print!("{}", describe(persona));
    Ok(())
}

fn describe(persona: &Persona) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Persona:       {}", persona.name);
    let _ = writeln!(out, "Label:         {}", persona.label);
    let _ = writeln!(out, "Greeting:      {}", persona.greeting);
    let _ = writeln!(
        out,
        "Typing delay:  {}-{} ms",
        persona.min_delay_ms, persona.max_delay_ms
    );
    let _ = writeln!(out, "Export prefix: {}", persona.export_prefix);
    let _ = writeln!(out);
    let _ = writeln!(out, "Categories (first match wins):");
    for (index, category) in persona.categories.iter().enumerate() {
        let triggers = category
            .triggers
            .iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "  {:>2}. {:<12} {} ({} {})",
            index + 1,
            category.name,
            triggers,
            category.replies.len(),
            if category.replies.len() == 1 { "reply" } else { "replies" }
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Fallback replies: {}", persona.fallback.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_categories_in_order() {
        let text = describe(&Persona::assistant());
        assert!(text.contains("Label:         Bot"));
        assert!(text.contains("Typing delay:  1000-2000 ms"));
        let greeting = text.find("1. greeting").unwrap();
        let weather = text.find("3. weather").unwrap();
        let gratitude = text.find("6. gratitude").unwrap();
        assert!(greeting < weather && weather < gratitude);
        assert!(text.contains("\"thanks\", \"thank you\" (1 reply)"));
        assert!(text.contains("(3 replies)"));
        assert!(text.ends_with("Fallback replies: 5\n"));
    }
}
