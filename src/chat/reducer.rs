//! Transitions of the chat view.

use super::intent::ChatIntent;
use super::state::{
    ChatModel, END_FAILED, Message, Role, SEND_FAILED, START_FAILED, Session,
    UnansweredTurnPolicy,
};

/// Applies intents to the chat model. Intents that don't fit the current
/// state leave it untouched.
pub struct ChatReducer;

impl ChatReducer {
    pub fn reduce(mut model: ChatModel, intent: ChatIntent) -> ChatModel {
        match intent {
            ChatIntent::FileSelected(file) => {
                if model.can_select_file() {
                    model.session = Session::Starting { file };
                    model.error = None;
                    model.loading = true;
                }
            }

            ChatIntent::SessionStarted { session_id } => {
                model.session = match model.session {
                    Session::Starting { file } => {
                        model.loading = false;
                        let greeting = Message::greeting(file.name());
                        Session::Active {
                            session_id,
                            file,
                            transcript: vec![greeting],
                        }
                    }
                    other => other,
                };
            }

            ChatIntent::StartFailed => {
                if matches!(model.session, Session::Starting { .. }) {
                    // Drops the file along with the attempt
                    model.session = Session::NoSession;
                    model.report_error(START_FAILED);
                    model.loading = false;
                }
            }

            ChatIntent::MessageSubmitted(text) => {
                if model.can_send(&text) {
                    if let Session::Active { transcript, .. } = &mut model.session {
                        transcript.push(Message::new(Role::User, text.trim()));
                    }
                    model.error = None;
                    model.loading = true;
                }
            }

            ChatIntent::ReplyReceived(text) => {
                if !model.loading {
                    return model;
                }
                if let Session::Active { transcript, .. } = &mut model.session {
                    transcript.push(Message::new(Role::Assistant, &text));
                    model.loading = false;
                }
            }

            ChatIntent::SendFailed => {
                if !model.loading {
                    return model;
                }
                if let Session::Active { transcript, .. } = &mut model.session {
                    if model.policy == UnansweredTurnPolicy::Rollback
                        && transcript.last().is_some_and(|m| m.role == Role::User)
                    {
                        transcript.pop();
                    }
                    model.report_error(SEND_FAILED);
                    model.loading = false;
                }
            }

            ChatIntent::EndRequested => {
                if model.can_end() {
                    model.error = None;
                    model.loading = true;
                }
            }

            ChatIntent::SessionEnded => {
                if model.session.is_active() && model.loading {
                    model.session = Session::NoSession;
                    model.loading = false;
                }
            }

            ChatIntent::EndFailed => {
                if model.session.is_active() && model.loading {
                    model.report_error(END_FAILED);
                    model.loading = false;
                }
            }
        }

        model
    }

    /// Apply several intents in order.
    pub fn reduce_all(model: ChatModel, intents: impl IntoIterator<Item = ChatIntent>) -> ChatModel {
        intents.into_iter().fold(model, Self::reduce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SelectedFile;

    fn report() -> SelectedFile {
        SelectedFile::new("report.pdf", b"%PDF".to_vec())
    }

    fn active(policy: UnansweredTurnPolicy) -> ChatModel {
        ChatReducer::reduce_all(
            ChatModel::new(policy),
            [
                ChatIntent::FileSelected(report()),
                ChatIntent::SessionStarted {
                    session_id: String::from("abc"),
                },
            ],
        )
    }

    #[test]
    fn file_selection_starts_a_session() {
        let model = ChatReducer::reduce(ChatModel::default(), ChatIntent::FileSelected(report()));
        assert_eq!(model.session, Session::Starting { file: report() });
        assert!(model.loading);
    }

    #[test]
    fn started_session_is_seeded_with_one_greeting() {
        let model = active(UnansweredTurnPolicy::Keep);
        assert_eq!(model.session.session_id(), Some("abc"));
        let transcript = model.session.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, Role::Assistant);
        assert!(transcript[0].content.contains("report.pdf"));
        assert!(!model.loading);
    }

    #[test]
    fn failed_start_clears_everything_and_reports() {
        let model = ChatReducer::reduce_all(
            ChatModel::default(),
            [ChatIntent::FileSelected(report()), ChatIntent::StartFailed],
        );
        assert_eq!(model.session, Session::NoSession);
        assert!(model.session.file().is_none());
        assert_eq!(model.error.as_deref(), Some(START_FAILED));
        assert!(!model.loading);
    }

    #[test]
    fn user_message_is_appended_before_the_reply() {
        let model = ChatReducer::reduce(
            active(UnansweredTurnPolicy::Keep),
            ChatIntent::MessageSubmitted(String::from("hi")),
        );
        let transcript = model.session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1], Message::new(Role::User, "hi"));
        assert!(model.loading);

        let model = ChatReducer::reduce(model, ChatIntent::ReplyReceived(String::from("hello")));
        let transcript = model.session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2], Message::new(Role::Assistant, "hello"));
        assert!(!model.loading);
    }

    #[test]
    fn blank_messages_are_ignored() {
        let before = active(UnansweredTurnPolicy::Keep);
        let after = ChatReducer::reduce(
            before.clone(),
            ChatIntent::MessageSubmitted(String::from(" \n\t ")),
        );
        assert_eq!(before, after);
    }

    #[test]
    fn submitted_text_is_trimmed() {
        let model = ChatReducer::reduce(
            active(UnansweredTurnPolicy::Keep),
            ChatIntent::MessageSubmitted(String::from("  hi there \n")),
        );
        assert_eq!(model.session.transcript()[1].content, "hi there");
    }

    #[test]
    fn messages_need_an_active_session() {
        let model = ChatReducer::reduce(
            ChatModel::default(),
            ChatIntent::MessageSubmitted(String::from("hi")),
        );
        assert_eq!(model, ChatModel::default());
    }

    #[test]
    fn failed_send_keeps_the_unanswered_turn_by_default() {
        let model = ChatReducer::reduce_all(
            active(UnansweredTurnPolicy::Keep),
            [
                ChatIntent::MessageSubmitted(String::from("hi")),
                ChatIntent::SendFailed,
            ],
        );
        let transcript = model.session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1], Message::new(Role::User, "hi"));
        assert_eq!(model.error.as_deref(), Some(SEND_FAILED));
        assert!(!model.loading);
    }

    #[test]
    fn failed_send_rolls_back_when_configured() {
        let model = ChatReducer::reduce_all(
            active(UnansweredTurnPolicy::Rollback),
            [
                ChatIntent::MessageSubmitted(String::from("hi")),
                ChatIntent::SendFailed,
            ],
        );
        let transcript = model.session.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role, Role::Assistant);
        assert_eq!(model.error.as_deref(), Some(SEND_FAILED));
    }

    #[test]
    fn next_action_clears_the_error() {
        let model = ChatReducer::reduce_all(
            active(UnansweredTurnPolicy::Keep),
            [
                ChatIntent::MessageSubmitted(String::from("hi")),
                ChatIntent::SendFailed,
            ],
        );
        assert!(model.error.is_some());

        let model = ChatReducer::reduce(model, ChatIntent::MessageSubmitted(String::from("again")));
        assert!(model.error.is_none());
    }

    #[test]
    fn ending_resets_session_transcript_and_file() {
        let model = ChatReducer::reduce_all(
            active(UnansweredTurnPolicy::Keep),
            [ChatIntent::EndRequested, ChatIntent::SessionEnded],
        );
        assert_eq!(model.session, Session::NoSession);
        assert!(model.session.transcript().is_empty());
        assert!(model.session.file().is_none());
        assert!(model.error.is_none());
        assert!(model.can_select_file());
    }

    #[test]
    fn failed_end_only_reports() {
        let before = active(UnansweredTurnPolicy::Keep);
        let after = ChatReducer::reduce_all(
            before.clone(),
            [ChatIntent::EndRequested, ChatIntent::EndFailed],
        );
        assert_eq!(after.session, before.session);
        assert_eq!(after.error.as_deref(), Some(END_FAILED));
        assert!(!after.loading);
    }

    #[test]
    fn in_flight_requests_block_other_actions() {
        let sending = ChatReducer::reduce(
            active(UnansweredTurnPolicy::Keep),
            ChatIntent::MessageSubmitted(String::from("hi")),
        );
        let after = ChatReducer::reduce_all(
            sending.clone(),
            [
                ChatIntent::MessageSubmitted(String::from("again")),
                ChatIntent::EndRequested,
                ChatIntent::FileSelected(report()),
            ],
        );
        assert_eq!(after, sending);
    }

    #[test]
    fn stray_results_are_ignored() {
        let idle = ChatModel::default();
        let after = ChatReducer::reduce_all(
            idle.clone(),
            [
                ChatIntent::SessionStarted {
                    session_id: String::from("zzz"),
                },
                ChatIntent::ReplyReceived(String::from("late")),
                ChatIntent::SendFailed,
                ChatIntent::SessionEnded,
                ChatIntent::EndFailed,
                ChatIntent::StartFailed,
            ],
        );
        assert_eq!(after, idle);
    }

    #[test]
    fn stray_results_leave_an_idle_session_alone() {
        let idle = active(UnansweredTurnPolicy::Rollback);
        assert!(!idle.loading);
        let after = ChatReducer::reduce_all(
            idle.clone(),
            [
                ChatIntent::ReplyReceived(String::from("unasked")),
                ChatIntent::SendFailed,
                ChatIntent::SessionEnded,
                ChatIntent::EndFailed,
                ChatIntent::StartFailed,
                ChatIntent::SessionStarted {
                    session_id: String::from("zzz"),
                },
            ],
        );
        assert_eq!(after, idle);
        assert_eq!(after.session.transcript().len(), 1);
        assert!(after.error.is_none());
    }
}
