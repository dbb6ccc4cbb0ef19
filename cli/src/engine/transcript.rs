//! # Transcript Export
//!
//! File: cli/src/engine/transcript.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Renders a conversation as plain text, one line per message:
//!
//! ```text
//! [3:04:05 PM] Bot: Hello! I'm your AI assistant. How can I help you today?
//! [3:04:09 PM] You: tell me a joke
//! ```
//!
//! Lines are joined with `\n` and there is no trailing newline or header. The file
//! name is `<prefix>-<YYYY-MM-DD>.txt`, dated in UTC.
//!
//! The format is consumed by existing tooling, so it must stay byte-for-byte stable.
//!
use crate::core::error::{ParleyError, Result};
use crate::engine::message::{Message, Sender};
use crate::engine::persona::USER_LABEL;
use crate::engine::selector::TIME_OF_DAY_FORMAT;
use anyhow::Context;
use chrono::{NaiveDate, TimeZone, Utc};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A rendered transcript and the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub file_name: String,
    pub contents: String,
}

impl Transcript {
    /// Renders `messages` with timestamps shown in `tz`, naming the file for `date`.
    pub fn render<Tz>(
        messages: &[Message],
        bot_label: &str,
        prefix: &str,
        tz: &Tz,
        date: NaiveDate,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let contents = messages
            .iter()
            .map(|message| {
                let label = match message.sender() {
                    Sender::Bot => bot_label,
                    Sender::User => USER_LABEL,
                };
                format!(
                    "[{}] {}: {}",
                    message
                        .timestamp()
                        .with_timezone(tz)
                        .format(TIME_OF_DAY_FORMAT),
                    label,
                    message.text()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            file_name: file_name(prefix, date),
            contents,
        }
    }

    /// Writes the transcript into `directory`, creating it when missing.
    ///
    /// ## Returns
    ///
    /// * `Result<PathBuf>` - The path of the written file.
    pub fn write_to(&self, directory: &Path) -> Result<PathBuf> {
        if directory.exists() && !directory.is_dir() {
            return Err(ParleyError::Export(format!(
                "'{}' exists but is not a directory.",
                directory.display()
            ))
            .into());
        }
        fs::create_dir_all(directory).with_context(|| {
            format!("Failed to create export directory: {}", directory.display())
        })?;

        let path = directory.join(&self.file_name);
        debug!("Writing {} bytes of transcript", self.contents.len());
        fs::write(&path, &self.contents)
            .with_context(|| format!("Failed to write transcript: {}", path.display()))?;
        info!("Transcript written to {}", path.display());
        Ok(path)
    }
}

/// `<prefix>-<YYYY-MM-DD>.txt`
pub fn file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.txt", prefix, date.format("%Y-%m-%d"))
}

/// Today's date as used in export file names.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
