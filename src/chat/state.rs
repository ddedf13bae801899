//! State of the chat view.

use clap::ValueEnum;

use crate::document::SelectedFile;

pub const START_FAILED: &str = "Failed to start chat session. Please try again.";
pub const SEND_FAILED: &str = "Failed to send message. Please try again.";
pub const END_FAILED: &str = "Failed to end chat session. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }

    /// The assistant turn that opens every session.
    pub fn greeting(file_name: &str) -> Self {
        Self::new(
            Role::Assistant,
            &format!("I've loaded \"{file_name}\". What would you like to know about it?"),
        )
    }
}

/// What happens to a user message whose send failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UnansweredTurnPolicy {
    /// Leave it in the transcript without a reply.
    #[default]
    Keep,
    /// Take it back out of the transcript.
    Rollback,
}

/// Chat session lifecycle. A transcript only exists inside `Active`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    #[default]
    NoSession,
    /// The document is uploaded and the session is being created.
    Starting { file: SelectedFile },
    Active {
        session_id: String,
        file: SelectedFile,
        transcript: Vec<Message>,
    },
}

impl Session {
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::Active { session_id, .. } => Some(session_id),
            _ => None,
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match self {
            Self::NoSession => None,
            Self::Starting { file } | Self::Active { file, .. } => Some(file),
        }
    }

    pub fn transcript(&self) -> &[Message] {
        match self {
            Self::Active { transcript, .. } => transcript,
            _ => &[],
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// Everything the chat view renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatModel {
    pub session: Session,
    /// Most recent failure, shown until the next user action.
    pub error: Option<String>,
    /// Bumped every time a failure lands in `error`, so repeats of the
    /// same message can still be told apart.
    pub errors_reported: u64,
    pub loading: bool,
    pub policy: UnansweredTurnPolicy,
}

impl ChatModel {
    pub fn new(policy: UnansweredTurnPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn report_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.errors_reported += 1;
    }

    pub fn can_select_file(&self) -> bool {
        matches!(self.session, Session::NoSession) && !self.loading
    }

    pub fn can_send(&self, text: &str) -> bool {
        self.session.is_active() && !self.loading && !text.trim().is_empty()
    }

    pub fn can_end(&self) -> bool {
        self.session.is_active() && !self.loading
    }
}
