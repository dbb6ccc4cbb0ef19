//! # Conversation State
//!
//! File: cli/src/engine/conversation.rs
//! Author: Christi Mahu
//!
//! An append-only, ordered list of messages that always starts with the persona's
//! greeting. The list is never empty: `clear` puts a fresh copy of the greeting back.
//!
use crate::engine::message::{Message, Sender};

#[derive(Debug, Clone)]
pub struct Conversation {
    greeting: String,
    messages: Vec<Message>,
}

impl Conversation {
    /// Starts a conversation holding only the bot's greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let messages = vec![Message::new(Sender::Bot, greeting.clone())];
        Self { greeting, messages }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drops everything and re-seeds with the greeting.
    pub fn clear(&mut self) {
        let seed = Message::new(Sender::Bot, self.greeting());
        self.messages.clear();
        self.messages.push(seed);
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[allow(dead_code)] // Used by `ConversationController::len`.
    pub fn len(&self) -> usize {
        self.messages.len()
    }
}
