//! # Parley Persona List
//!
//! File: cli/src/commands/persona/list.rs
//! Author: Christi Mahu
//!
//! Prints one row per available persona:
//!
//! ```text
//! NAME        LABEL   CATEGORIES  DELAY (ms)
//! ----------  ------  ----------  ----------
//! assistant   Bot     6           1000-2000
//! ona         Ona     13          800-2000
//! ```
//!
use crate::core::config;
use crate::core::error::Result;
use crate::engine::persona::Persona;
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// # List Persona Arguments (`ListArgs`)
///
/// The command takes no options; the struct exists for consistency with the
/// other subcommands.
#[derive(Parser, Debug)]
pub struct ListArgs {}

/// # Handle Persona List Command (`handle_list`)
pub async fn handle_list(_args: ListArgs) -> Result<()> {
    info!("Handling persona list command...");

    let cfg = config::load_config().context("Failed to load Parley configuration")?;
    let registry = cfg.persona_registry()?;
    let personas: Vec<&Persona> = registry.iter().collect();
    print!("{}", render_table(&personas, cfg.persona_name()));
    Ok(())
}

/// Formats the persona table. The default persona is marked with `*`.
fn render_table(personas: &[&Persona], default_name: &str) -> String {
    let headers = ["NAME", "LABEL", "CATEGORIES", "DELAY (ms)"];
    let rows: Vec<[String; 4]> = personas
        .iter()
        .map(|p| {
            let name = if p.name.eq_ignore_ascii_case(default_name) {
                format!("{} *", p.name)
            } else {
                p.name.clone()
            };
            [
                name,
                p.label.clone(),
                p.categories.len().to_string(),
                format!("{}-{}", p.min_delay_ms, p.max_delay_ms),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let format_row = |cells: [&str; 4]| -> String {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut out = format_row(headers);
    out.push_str(&format_row(widths.map(|w| "-".repeat(w)).each_ref().map(String::as_str)));
    for row in &rows {
        out.push_str(&format_row(row.each_ref().map(String::as_str)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_lists_builtins() {
        let assistant = Persona::assistant();
        let ona = Persona::ona();
        let table = render_table(&[&assistant, &ona], "assistant");
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[2].starts_with("assistant *"));
        assert!(lines[2].contains("1000-2000"));
        assert!(lines[3].starts_with("ona "));
        assert!(lines[3].contains("13"));
        assert!(lines[3].ends_with("800-2000"));
    }
}
