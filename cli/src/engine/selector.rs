//! # Response Selector
//!
//! File: cli/src/engine/selector.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Picks the bot's reply to a line of user input. The input is lowercased and the
//! persona's category table is walked in order; the first category with a trigger
//! contained in the input wins, and one of its replies is chosen at random. When no
//! category matches, a reply is drawn from the persona's fallback pool.
//!
//! Matching is plain substring containment over the whole input. "hi there, what's
//! the weather" is a greeting, not a weather question, because the greeting row is
//! checked first. Likewise "this" contains "hi".
//!
//! The random source is passed in by the caller, so a seeded `StdRng` makes every
//! choice reproducible.
//!
use crate::engine::message::Message;
use crate::engine::persona::{Category, Persona, TIME_PLACEHOLDER};
use chrono::{Local, NaiveTime};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

/// Format used for times of day in replies and transcripts, e.g. `3:04:05 PM`.
pub const TIME_OF_DAY_FORMAT: &str = "%-I:%M:%S %p";

/// Last-resort reply for a persona whose pools are empty.
const SILENT_REPLY: &str = "...";

/// Renders a time of day the way it appears in replies and transcripts.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_OF_DAY_FORMAT).to_string()
}

/// Keyword-driven reply picker for one persona.
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    persona: Arc<Persona>,
}

impl ResponseSelector {
    pub fn new(persona: Arc<Persona>) -> Self {
        Self { persona }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Finds the highest-priority category whose trigger occurs in `input`.
    pub fn classify(&self, input: &str) -> Option<&Category> {
        let lowered = input.to_lowercase();
        self.persona
            .categories
            .iter()
            .find(|category| category.matches(&lowered))
    }

    /// Chooses a reply to `input`, stamping time-of-day templates with the local clock.
    ///
    /// `_history` is the conversation so far. The keyword table does not look at it.
    pub fn select<R: Rng>(&self, input: &str, _history: &[Message], rng: &mut R) -> String {
        self.select_at(input, rng, Local::now().time())
    }

    /// Same as [`select`](Self::select) with an explicit time of day.
    pub fn select_at<R: Rng>(&self, input: &str, rng: &mut R, now: NaiveTime) -> String {
        let pool = match self.classify(input) {
            Some(category) => {
                debug!("Input matched category '{}'", category.name);
                &category.replies
            }
            None => {
                debug!("No category matched, using fallback pool");
                &self.persona.fallback
            }
        };

        let template = pool
            .choose(rng)
            .or_else(|| self.persona.fallback.choose(rng))
            .map(String::as_str)
            .unwrap_or(SILENT_REPLY);

        if template.contains(TIME_PLACEHOLDER) {
            template.replace(TIME_PLACEHOLDER, &format_time_of_day(now))
        } else {
            template.to_string()
        }
    }
}
