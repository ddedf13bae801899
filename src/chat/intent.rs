//! Events that drive the chat view.

use crate::document::SelectedFile;

#[derive(Debug, Clone, PartialEq)]
pub enum ChatIntent {
    /// User picked a document. Starts a session.
    FileSelected(SelectedFile),
    SessionStarted { session_id: String },
    StartFailed,

    /// User submitted text. Appended before the service answers.
    MessageSubmitted(String),
    ReplyReceived(String),
    SendFailed,

    EndRequested,
    SessionEnded,
    EndFailed,
}
