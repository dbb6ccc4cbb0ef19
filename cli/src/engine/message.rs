//! # Chat Messages
//!
//! File: cli/src/engine/message.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `Message` is one entry in a conversation: who said it, what was said and when.
//! Messages are immutable once created; the fields are private and only exposed
//! through accessors so nothing downstream can rewrite history.
//!
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// The kind of content a message carries. Only plain text exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Text,
}

/// A single, immutable chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: Uuid,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
    kind: MessageKind,
}

impl Message {
    /// Creates a message stamped with the current time and a fresh identifier.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self::at(sender, text, Utc::now())
    }

    /// Creates a message with an explicit timestamp.
    pub fn at(sender: Sender, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp,
            kind: MessageKind::Text,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[allow(dead_code)] // Only text messages exist so far; nothing branches on the kind yet.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}
