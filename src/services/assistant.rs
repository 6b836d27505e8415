//! Assistant service
//!
//! Simulated AI chat backed by canned responses. The responder is a
//! trait so the chat session and summary helper can be exercised with
//! test doubles; the production implementation sleeps to imitate
//! network latency and picks from a fixed response list.
//!
//! Responder failures never propagate out of the chat surface: they
//! degrade to the configured fallback message.

use crate::config;
use crate::database::Note;
use crate::error::{AppError, Result};
use crate::services::NotesService;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Canned lines the mock responder picks from
const MOCK_RESPONSES: &[&str] = &[
    "This note appears to be about a meeting layout. Have you considered adding a whiteboard for better visualization?",
    "I can help you summarize this. It looks like a brainstorming session.",
    "That's an interesting point. Would you like me to expand on that concept?",
    "I've analyzed the text. It seems focused on UI/UX design principles.",
    "Recorded. I'll remind you about this deadline tomorrow.",
];

/// Reply returned when the user asks for a summary
const MOCK_SUMMARY: &str = "Here is a summary of your note:\n\n\
    The note covers upcoming work and key discussion points, with a focus \
    on the items edited most recently.";

/// Produces an assistant reply for one user message with note context
#[allow(async_fn_in_trait)]
pub trait AiResponder {
    async fn respond(&self, user_text: &str, note_context: &str) -> Result<String>;
}

/// Mock responder: fixed delay, canned output
#[derive(Debug, Clone)]
pub struct MockResponder {
    delay: Duration,
}

impl MockResponder {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(config::ASSISTANT_RESPONSE_DELAY_MS),
        }
    }

    /// Override the simulated latency (tests use zero)
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl AiResponder for MockResponder {
    async fn respond(&self, user_text: &str, _note_context: &str) -> Result<String> {
        // Simulate network delay
        tokio::time::sleep(self.delay).await;

        if user_text.to_lowercase().contains("summarize") {
            return Ok(MOCK_SUMMARY.to_string());
        }

        let reply = MOCK_RESPONSES
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| AppError::Assistant("no responses configured".to_string()))?;

        Ok(reply.to_string())
    }
}

/// One message in a chat session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(content: String, is_user: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            is_user,
            timestamp: Utc::now(),
        }
    }
}

/// In-memory conversation log bound to one note's context
pub struct ChatSession<R: AiResponder> {
    responder: R,
    note_context: String,
    messages: Vec<ChatMessage>,
}

impl<R: AiResponder> ChatSession<R> {
    /// Start a session seeded with the greeting message
    pub fn new(responder: R, note_context: String) -> Self {
        Self {
            responder,
            note_context,
            messages: vec![ChatMessage::new(
                config::ASSISTANT_GREETING.to_string(),
                false,
            )],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Empty the conversation log
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Send a user message and append the assistant's reply.
    ///
    /// A responder failure becomes the fallback message; this method
    /// never fails.
    pub async fn send(&mut self, text: String) -> ChatMessage {
        self.messages.push(ChatMessage::new(text.clone(), true));

        let reply = match self.responder.respond(&text, &self.note_context).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!("Assistant call failed, using fallback: {}", err);
                config::ASSISTANT_FALLBACK_MESSAGE.to_string()
            }
        };

        let message = ChatMessage::new(reply, false);
        self.messages.push(message.clone());
        message
    }
}

/// Ask the responder for a summary of `note` and store it on the note.
///
/// Responder failures degrade to the fallback message, so the user
/// always sees something.
pub async fn summarize_note<R: AiResponder>(
    responder: &R,
    notes: &NotesService,
    note: &Note,
) -> Result<Note> {
    tracing::info!("Summarizing note: {}", note.id);

    let summary = match responder.respond("summarize", &note.content).await {
        Ok(summary) => summary,
        Err(err) => {
            tracing::warn!("Summary call failed, using fallback: {}", err);
            config::ASSISTANT_FALLBACK_MESSAGE.to_string()
        }
    };

    notes.set_summary(&note.id, Some(&summary)).await
}
