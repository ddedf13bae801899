use crate::api::ApiClient;
use crate::document::SelectedFile;

use super::intent::ChatIntent;
use super::reducer::ChatReducer;
use super::state::{ChatModel, UnansweredTurnPolicy};

/// Chat view: runs the session state machine around calls to the
/// document service. Failures never escape, they land in the error
/// slot and the log.
pub struct ChatView {
    client: ApiClient,
    model: ChatModel,
}

impl ChatView {
    pub fn new(client: ApiClient, policy: UnansweredTurnPolicy) -> Self {
        Self {
            client,
            model: ChatModel::new(policy),
        }
    }

    pub fn model(&self) -> &ChatModel {
        &self.model
    }

    fn dispatch(&mut self, intent: ChatIntent) {
        let model = std::mem::take(&mut self.model);
        self.model = ChatReducer::reduce(model, intent);
    }

    /// Upload the document and open a session for it.
    pub async fn select_file(&mut self, file: SelectedFile) {
        if !self.model.can_select_file() {
            tracing::debug!("Ignoring file selection, a session is already open");
            return;
        }
        let name = file.name().to_string();
        self.dispatch(ChatIntent::FileSelected(file));

        let Some(upload) = self.model.session.file() else {
            return;
        };
        let result = self.client.start_chat(upload).await;
        match result {
            Ok(resp) => {
                tracing::info!("Started chat session {} for {}", resp.session_id, name);
                self.dispatch(ChatIntent::SessionStarted {
                    session_id: resp.session_id,
                });
            }
            Err(e) => {
                tracing::error!("Error starting chat for {}: {}", name, e);
                self.dispatch(ChatIntent::StartFailed);
            }
        }
    }

    /// Send a message in the open session. Blank text and calls without
    /// a session do nothing.
    pub async fn send(&mut self, text: &str) {
        if !self.model.can_send(text) {
            return;
        }
        let Some(session_id) = self.model.session.session_id().map(str::to_owned) else {
            return;
        };
        self.dispatch(ChatIntent::MessageSubmitted(text.to_string()));

        match self.client.send_message(&session_id, text.trim()).await {
            Ok(reply) => self.dispatch(ChatIntent::ReplyReceived(reply.response)),
            Err(e) => {
                tracing::error!("Error sending message in session {}: {}", session_id, e);
                self.dispatch(ChatIntent::SendFailed);
            }
        }
    }

    pub async fn end(&mut self) {
        if !self.model.can_end() {
            return;
        }
        let Some(session_id) = self.model.session.session_id().map(str::to_owned) else {
            return;
        };
        self.dispatch(ChatIntent::EndRequested);

        match self.client.end_chat(&session_id).await {
            Ok(()) => {
                tracing::info!("Ended chat session {}", session_id);
                self.dispatch(ChatIntent::SessionEnded);
            }
            Err(e) => {
                tracing::error!("Error ending chat session {}: {}", session_id, e);
                self.dispatch(ChatIntent::EndFailed);
            }
        }
    }
}
