//! Text rendering of the chat transcript.

use super::state::{ChatModel, Message, Role};

/// Tracks how much of the transcript has been shown so the view can jump
/// to the latest messages whenever the transcript length changes.
#[derive(Debug, Default)]
pub struct TranscriptFollower {
    shown: usize,
}

impl TranscriptFollower {
    /// Messages added since the last call. A shorter transcript means a
    /// new session, which is shown from the top.
    pub fn unseen<'a>(&mut self, transcript: &'a [Message]) -> &'a [Message] {
        if transcript.len() < self.shown {
            self.shown = 0;
        }
        let fresh = &transcript[self.shown..];
        self.shown = transcript.len();
        fresh
    }
}

/// Shows each reported failure once, however many times the view is
/// redrawn while it stays in the error slot.
#[derive(Debug, Default)]
pub struct ErrorBanner {
    shown: u64,
}

impl ErrorBanner {
    pub fn unseen<'a>(&mut self, model: &'a ChatModel) -> Option<&'a str> {
        if model.errors_reported == self.shown {
            return None;
        }
        self.shown = model.errors_reported;
        model.error.as_deref()
    }
}

pub fn format_message(message: &Message) -> String {
    let speaker = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    format!("{}> {}", speaker, message.content)
}
