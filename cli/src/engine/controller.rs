//! # Conversation Controller
//!
//! File: cli/src/engine/controller.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Drives a single chat session: accepts user submissions, simulates the bot
//! "typing" for a random moment, then appends the bot's reply. It also owns the
//! draft input buffer and the composing flag the front end uses to decide whether
//! the send action is available.
//!
//! ## Architecture
//!
//! - Session state (conversation, composing flag, random source, generation counter)
//!   lives behind a `tokio::sync::Mutex` shared with the reply task.
//! - Each accepted submission spawns one reply task. Its `JoinHandle` is kept by the
//!   controller so `submit` and `clear` can abort it.
//! - Every submit and clear bumps the generation. A reply task only writes when the
//!   generation it was scheduled under is still current, so a reply can never land
//!   in a conversation that was cleared or moved on after it was scheduled.
//!
//! ## Examples
//!
//! ```rust
//! let persona = Arc::new(Persona::assistant());
//! let mut controller = ConversationController::new(persona, seeded_rng(Some(7)));
//! controller.submit("tell me a joke").await;
//! controller.wait_for_reply().await?;
//! println!("{}", controller.export().await.contents);
//! ```
//!
use crate::core::error::Result;
use crate::engine::conversation::Conversation;
use crate::engine::message::Message;
use crate::engine::persona::{DelayRange, Persona};
use crate::engine::selector::ResponseSelector;
use crate::engine::transcript::{self, Transcript};
use anyhow::Context;
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Builds the session's random source. A fixed seed makes replies and delays reproducible.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug)]
struct Session {
    conversation: Conversation,
    composing: bool,
    generation: u64,
    rng: StdRng,
}

/// Owns one conversation and the reply task currently scheduled for it.
#[derive(Debug)]
pub struct ConversationController {
    selector: Arc<ResponseSelector>,
    delay: DelayRange,
    session: Arc<Mutex<Session>>,
    pending: Option<JoinHandle<()>>,
    input: String,
}

impl ConversationController {
    /// Creates a controller whose conversation holds only the persona's greeting.
    /// The typing delay defaults to the persona's window.
    pub fn new(persona: Arc<Persona>, rng: StdRng) -> Self {
        let delay = persona.delay();
        let conversation = Conversation::new(persona.greeting.clone());
        Self {
            selector: Arc::new(ResponseSelector::new(persona)),
            delay,
            session: Arc::new(Mutex::new(Session {
                conversation,
                composing: false,
                generation: 0,
                rng,
            })),
            pending: None,
            input: String::new(),
        }
    }

    /// Overrides the typing delay window.
    pub fn with_delay(mut self, delay: DelayRange) -> Self {
        self.delay = delay;
        self
    }

    pub fn persona(&self) -> &Persona {
        self.selector.persona()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// True when the draft holds something to send and no reply is being composed.
    pub async fn can_send(&self) -> bool {
        !self.input.trim().is_empty() && !self.is_composing().await
    }

    /// Submits the draft input buffer.
    pub async fn send(&mut self) -> bool {
        let text = self.input().to_string();
        self.submit(&text).await
    }

    /// # Submit a User Message (`submit`)
    ///
    /// Appends `text` verbatim as a user message and schedules the bot's reply after
    /// a delay drawn from the typing window. Any reply still pending from an earlier
    /// submission is cancelled first.
    ///
    /// Whitespace-only input is ignored.
    ///
    /// ## Returns
    ///
    /// * `bool` - Whether the submission was accepted.
    pub async fn submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            debug!("Ignoring empty submission");
            return false;
        }
        self.cancel_pending();

        let (generation, delay) = {
            let mut session = self.session.lock().await;
            session.conversation.push(Message::user(text));
            session.composing = true;
            session.generation += 1;
            let delay = self.delay.sample(&mut session.rng);
            (session.generation, delay)
        };
        self.input.clear();
        debug!(
            "Scheduled reply #{} in {}ms",
            generation,
            delay.as_millis()
        );

        let session = Arc::clone(&self.session);
        let selector = Arc::clone(&self.selector);
        let text = text.to_string();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut guard = session.lock().await;
            if guard.generation != generation {
                debug!("Discarding stale reply #{}", generation);
                return;
            }
            let state = &mut *guard;
            let reply = selector.select(&text, state.conversation.messages(), &mut state.rng);
            let message = Message::bot(reply);
            trace!("Reply #{} ({}): {}", generation, message.id(), message.text());
            state.conversation.push(message);
            state.composing = false;
        }));
        true
    }

    /// Cancels any pending reply and resets the conversation to the greeting alone.
    pub async fn clear(&mut self) {
        self.cancel_pending();
        let mut session = self.session.lock().await;
        session.generation += 1;
        session.conversation.clear();
        session.composing = false;
        debug!("Conversation cleared");
    }

    /// Renders the conversation in local time, named for today's date.
    pub async fn export(&self) -> Transcript {
        let session = self.session.lock().await;
        let persona = self.selector.persona();
        Transcript::render(
            session.conversation.messages(),
            &persona.label,
            &persona.export_prefix,
            &Local,
            transcript::today(),
        )
    }

    /// Waits for the pending reply, if any, to land.
    pub async fn wait_for_reply(&mut self) -> Result<()> {
        if let Some(handle) = self.pending.take() {
            handle.await.context("Reply task failed")?;
        }
        Ok(())
    }

    pub async fn is_composing(&self) -> bool {
        self.session.lock().await.composing
    }

    /// Snapshot of the conversation so far.
    pub async fn messages(&self) -> Vec<Message> {
        self.session.lock().await.conversation.messages().to_vec()
    }

    #[allow(dead_code)] // Front ends read `messages()`; kept for callers that only need the count.
    pub async fn len(&self) -> usize {
        self.session.lock().await.conversation.len()
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Cancelling pending reply");
            }
            handle.abort();
        }
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
