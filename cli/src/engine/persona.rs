//! # Personas and Category Tables
//!
//! File: cli/src/engine/persona.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `Persona` bundles everything that distinguishes one chat companion from another:
//! its display label, the greeting that seeds every conversation, the ordered table
//! of keyword categories it answers to, the fallback replies for everything else, the
//! window the simulated typing delay is drawn from, and the prefix used when a
//! transcript is exported.
//!
//! ## Architecture
//!
//! - `Category`: one row of the table, `(name, triggers, replies)`. Row order is
//!   priority order; the first row whose trigger appears in the input wins.
//! - `DelayRange`: inclusive bounds, in milliseconds, for the typing delay.
//! - `Persona`: the full parameter set. Two are built in (`assistant` and `ona`);
//!   more can be declared in configuration as `[[personas]]` tables.
//! - `PersonaRegistry`: name lookup over built-in and configured personas.
//!
//! Reply templates may contain `{time}`, which the selector replaces with the
//! current wall-clock time.
//!
use crate::core::error::{ParleyError, Result};
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Placeholder replaced by the current time of day in reply templates.
pub const TIME_PLACEHOLDER: &str = "{time}";

/// Label used for the human side of a conversation in transcripts.
pub const USER_LABEL: &str = "You";

const DEFAULT_EXPORT_PREFIX: &str = "chat-export";
const DEFAULT_MIN_DELAY_MS: u64 = 1000;
const DEFAULT_MAX_DELAY_MS: u64 = 2000;

/// One row of a persona's category table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Short identifier, e.g. `greeting` or `joke`.
    pub name: String,
    /// Lowercase substrings; any one of them appearing in the lowercased input selects this row.
    pub triggers: Vec<String>,
    /// Candidate replies, one of which is picked uniformly at random.
    pub replies: Vec<String>,
}

impl Category {
    fn new(name: &str, triggers: &[&str], replies: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            replies: replies.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Returns true when any trigger occurs in `lowered`, which must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers
            .iter()
            .any(|trigger| lowered.contains(trigger.as_str()))
    }
}

/// Inclusive bounds for the simulated typing delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl DelayRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self> {
        if min_ms > max_ms {
            return Err(ParleyError::Config(format!(
                "Delay lower bound {}ms exceeds upper bound {}ms.",
                min_ms, max_ms
            ))
            .into());
        }
        Ok(Self { min_ms, max_ms })
    }

    /// A zero-length window: replies land as soon as the runtime gets to them.
    pub const fn immediate() -> Self {
        Self {
            min_ms: 0,
            max_ms: 0,
        }
    }

    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    /// Draws a delay uniformly from the window.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.random_range(self.min_ms..=self.max_ms))
    }
}

/// The full parameter set for one chat companion.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Persona {
    pub name: String,
    /// Sender label for the bot in transcripts ("Bot", "Ona", ...).
    pub label: String,
    /// Text of the seed message every conversation starts with.
    pub greeting: String,
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Ordered category table. Earlier rows take priority.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Replies used when no category matches.
    pub fallback: Vec<String>,
}

fn default_export_prefix() -> String {
    DEFAULT_EXPORT_PREFIX.to_string()
}
fn default_min_delay_ms() -> u64 {
    DEFAULT_MIN_DELAY_MS
}
fn default_max_delay_ms() -> u64 {
    DEFAULT_MAX_DELAY_MS
}

impl Persona {
    /// The general-purpose assistant persona.
    pub fn assistant() -> Self {
        Self {
            name: "assistant".to_string(),
            label: "Bot".to_string(),
            greeting: "Hello! I'm your AI assistant. How can I help you today?".to_string(),
            export_prefix: "chat-export".to_string(),
            min_delay_ms: 1000,
            max_delay_ms: 2000,
            categories: vec![
                Category::new(
                    "greeting",
                    &["hello", "hi"],
                    &["Hello! Nice to meet you. What would you like to talk about?"],
                ),
                Category::new(
                    "help",
                    &["help"],
                    &["I'm here to help! You can ask me questions, have a conversation, or just chat. What do you need assistance with?"],
                ),
                Category::new(
                    "weather",
                    &["weather"],
                    &["I don't have access to real-time weather data, but I'd recommend checking a weather app or website for current conditions in your area."],
                ),
                Category::new("time", &["time"], &["The current time is {time}."]),
                Category::new(
                    "joke",
                    &["joke"],
                    &[
                        "Why don't scientists trust atoms? Because they make up everything!",
                        "Why did the scarecrow win an award? He was outstanding in his field!",
                        "Why don't eggs tell jokes? They'd crack each other up!",
                    ],
                ),
                Category::new(
                    "gratitude",
                    &["thanks", "thank you"],
                    &["You're welcome! Is there anything else I can help you with?"],
                ),
            ],
            fallback: [
                "That's interesting! Can you tell me more about that?",
                "I understand. What would you like to explore about this topic?",
                "Thanks for sharing that with me. How can I assist you further?",
                "That's a good point. What else would you like to discuss?",
                "I see. Is there a specific aspect of this you'd like to focus on?",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Ona, the chattier companion with a wider category table.
    pub fn ona() -> Self {
        Self {
            name: "ona".to_string(),
            label: "Ona".to_string(),
            greeting: "Hi, I'm Ona! I'm always up for a chat. What's on your mind?".to_string(),
            export_prefix: "ona-chat-export".to_string(),
            min_delay_ms: 800,
            max_delay_ms: 2000,
            categories: vec![
                Category::new(
                    "greeting",
                    &["hello", "hi", "hey"],
                    &[
                        "Hey there! It's so nice to hear from you. What's on your mind?",
                        "Hello! Ona here. What would you like to chat about?",
                        "Hi! I was hoping someone would drop by. How's your day going?",
                    ],
                ),
                Category::new(
                    "help",
                    &["help"],
                    &[
                        "Of course! Tell me what you need and we'll figure it out together.",
                        "I'm happy to help. What are you working on?",
                    ],
                ),
                Category::new(
                    "weather",
                    &["weather"],
                    &[
                        "I can't look outside from in here, but a weather app will have the latest forecast for you.",
                        "I don't get live weather updates, sadly. Is it a sunny-day-plans kind of question?",
                    ],
                ),
                Category::new(
                    "time",
                    &["time"],
                    &[
                        "It's {time} right now.",
                        "My clock says {time}. Hope you're not running late!",
                    ],
                ),
                Category::new(
                    "joke",
                    &["joke"],
                    &[
                        "Why don't scientists trust atoms? Because they make up everything!",
                        "Why did the scarecrow win an award? He was outstanding in his field!",
                        "Why don't eggs tell jokes? They'd crack each other up!",
                        "What do you call a fake noodle? An impasta!",
                        "Why did the bicycle fall over? It was two tired!",
                    ],
                ),
                Category::new(
                    "gratitude",
                    &["thanks", "thank you"],
                    &[
                        "You're very welcome!",
                        "Anytime! That's what I'm here for.",
                        "My pleasure. Anything else I can do for you?",
                    ],
                ),
                Category::new(
                    "affection",
                    &["love", "adore"],
                    &[
                        "Aww, that's sweet of you to say!",
                        "You're making me blush. Well, I would if I could.",
                        "That means a lot to me. I really enjoy our chats too.",
                    ],
                ),
                Category::new(
                    "self-state",
                    &["how are you", "how's it going", "how do you feel"],
                    &[
                        "I'm doing great, thanks for asking! How about you?",
                        "Feeling chatty as ever. How are things on your end?",
                        "All good over here. What's new with you?",
                    ],
                ),
                Category::new(
                    "capability",
                    &["what can you do", "can you do", "your abilities"],
                    &[
                        "I can chat, tell jokes, tell you the time, and keep you company. Want to try one?",
                        "Mostly good conversation! Ask me for a joke, the time, or some advice.",
                    ],
                ),
                Category::new(
                    "identity",
                    &["who are you", "your name", "what are you"],
                    &[
                        "I'm Ona, your friendly chat companion.",
                        "The name's Ona! I'm here to chat whenever you like.",
                    ],
                ),
                Category::new(
                    "advice",
                    &["advice", "should i", "recommend"],
                    &[
                        "Trust your gut, but sleep on big decisions if you can.",
                        "Write down the pros and cons. Seeing them on paper often makes it clearer.",
                        "Ask yourself what you'd tell a friend in the same spot.",
                        "Start small. The first step is usually the hardest one.",
                    ],
                ),
                Category::new(
                    "compliment",
                    &["smart", "clever", "intelligent", "genius"],
                    &[
                        "Why thank you! I try my best.",
                        "Flattery will get you everywhere!",
                        "You're pretty clever yourself, you know.",
                    ],
                ),
                Category::new(
                    "boredom",
                    &["bored", "boring"],
                    &[
                        "Bored? Let's fix that. Want to hear a joke?",
                        "How about learning something new today? Pick a topic and tell me about it.",
                        "Boredom is just curiosity waiting for a target. What interests you?",
                        "We could play twenty questions. You think of something and I'll guess!",
                    ],
                ),
            ],
            fallback: [
                "Ooh, tell me more about that!",
                "Interesting! What made you think of that?",
                "I'm all ears. Go on!",
                "That sounds intriguing. How do you feel about it?",
                "Hmm, I'd love to hear more.",
                "Really? What happened next?",
                "I see! What else is on your mind?",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    pub fn builtins() -> Vec<Persona> {
        vec![Self::assistant(), Self::ona()]
    }

    pub fn delay(&self) -> DelayRange {
        DelayRange {
            min_ms: self.min_delay_ms,
            max_ms: self.max_delay_ms,
        }
    }

    /// Lowercases every trigger so table entries match the lowercased input.
    pub fn normalized(mut self) -> Self {
        for category in &mut self.categories {
            for trigger in &mut category.triggers {
                *trigger = trigger.to_lowercase();
            }
        }
        self
    }

    /// Checks the persona table for entries that could never produce a reply.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| -> anyhow::Error {
            ParleyError::InvalidPersona {
                name: self.name.clone(),
                reason,
            }
            .into()
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name cannot be empty".to_string()));
        }
        if self.label.trim().is_empty() {
            return Err(invalid("label cannot be empty".to_string()));
        }
        if self.greeting.trim().is_empty() {
            return Err(invalid("greeting cannot be empty".to_string()));
        }
        if self.export_prefix.trim().is_empty() {
            return Err(invalid("export_prefix cannot be empty".to_string()));
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(invalid(format!(
                "min_delay_ms ({}) exceeds max_delay_ms ({})",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        if self.fallback.is_empty() {
            return Err(invalid("fallback pool is empty".to_string()));
        }
        if self.fallback.iter().any(|r| r.trim().is_empty()) {
            return Err(invalid("fallback pool contains an empty reply".to_string()));
        }
        for category in &self.categories {
            if category.triggers.is_empty() {
                return Err(invalid(format!(
                    "category '{}' has no triggers",
                    category.name
                )));
            }
            if category.triggers.iter().any(|t| t.is_empty()) {
                return Err(invalid(format!(
                    "category '{}' has an empty trigger",
                    category.name
                )));
            }
            if category.replies.is_empty() {
                return Err(invalid(format!(
                    "category '{}' has no replies",
                    category.name
                )));
            }
            if category.replies.iter().any(|r| r.trim().is_empty()) {
                return Err(invalid(format!(
                    "category '{}' contains an empty reply",
                    category.name
                )));
            }
        }
        Ok(())
    }
}

/// Name lookup over built-in and configured personas.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    pub fn with_builtins() -> Self {
        Self {
            personas: Persona::builtins(),
        }
    }

    /// Validates and adds a persona. A persona whose name is already registered,
    /// ignoring ASCII case, replaces the earlier entry, so configuration can
    /// override a built-in.
    pub fn register(&mut self, persona: Persona) -> Result<()> {
        let persona = persona.normalized();
        persona.validate()?;
        if let Some(existing) = self
            .personas
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&persona.name))
        {
            warn!("Persona '{}' overrides an existing definition.", persona.name);
            *existing = persona;
        } else {
            debug!("Registered persona '{}'", persona.name);
            self.personas.push(persona);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Persona> {
        self.personas
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                ParleyError::UnknownPersona {
                    name: name.to_string(),
                }
                .into()
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }
}
