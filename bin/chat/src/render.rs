//! Transcript rendering.
//!
//! [`TranscriptView`] turns successive session snapshots into the lines
//! that are new since the previous snapshot.

use finsmart_conversation::{Message, Notice, Sender, SessionError, SessionSnapshot};

pub const ASSISTANT_NAME: &str = "FinSmart AI Assistant";
pub const INPUT_PLACEHOLDER: &str = "Ask: How much can I save this month?";
pub const TYPING_INDICATOR: &str = "FinSmart AI is typing...";

/// Banner printed when the session starts.
#[must_use]
pub fn header() -> String {
    format!("{ASSISTANT_NAME} - Always here to help\n{INPUT_PLACEHOLDER}")
}

#[must_use]
pub fn message_line(message: &Message) -> String {
    let author = match message.sender() {
        Sender::User => "You",
        Sender::Assistant => "FinSmart AI",
    };
    format!("[{}] {author}: {}", message.display_time(), message.text())
}

#[must_use]
pub fn notice_line(notice: &Notice) -> String {
    format!("! {notice}")
}

/// Explains a rejected command. Blank submissions are silent.
#[must_use]
pub fn rejection_line(error: &SessionError) -> Option<String> {
    match error {
        SessionError::Validation { .. } => None,
        SessionError::InvalidState { .. } => Some(format!("! {error}")),
    }
}

/// Tracks what has already been printed.
#[derive(Debug, Default)]
pub struct TranscriptView {
    rendered: usize,
    typing_shown: bool,
    notice_shown: Option<Notice>,
}

impl TranscriptView {
    /// Returns the lines to print for `snapshot`.
    pub fn update(&mut self, snapshot: &SessionSnapshot) -> Vec<String> {
        let mut lines: Vec<String> = snapshot
            .messages
            .iter()
            .skip(self.rendered)
            .map(message_line)
            .collect();
        self.rendered = snapshot.messages.len();

        let composing = snapshot.composing_state.is_composing();
        if composing && !self.typing_shown {
            lines.push(TYPING_INDICATOR.to_string());
        }
        self.typing_shown = composing;

        if snapshot.notice != self.notice_shown {
            if let Some(notice) = &snapshot.notice {
                lines.push(notice_line(notice));
            }
            self.notice_shown = snapshot.notice.clone();
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsmart_conversation::{ProviderError, ResponseDelivery, Session};

    #[test]
    fn first_update_prints_greeting() {
        let session = Session::new();
        let mut view = TranscriptView::default();

        let lines = view.update(&session.snapshot());

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("FinSmart AI: Hello!"));
        assert!(view.update(&session.snapshot()).is_empty());
    }

    #[test]
    fn typing_indicator_shown_once_per_request() {
        let mut session = Session::new();
        let mut view = TranscriptView::default();
        view.update(&session.snapshot());

        let pending = session.submit_user_message("Save?").expect("submit");
        let lines = view.update(&session.snapshot());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("You: Save?"));
        assert_eq!(lines[1], TYPING_INDICATOR);
        assert!(view.update(&session.snapshot()).is_empty());

        session.apply_response(ResponseDelivery::reply(pending.request_id, "Yes."));
        let lines = view.update(&session.snapshot());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("FinSmart AI: Yes."));
    }

    #[test]
    fn failure_prints_notice() {
        let mut session = Session::new();
        let mut view = TranscriptView::default();
        view.update(&session.snapshot());
        let pending = session.submit_user_message("Save?").expect("submit");
        view.update(&session.snapshot());

        session.apply_response(ResponseDelivery::failure(
            pending.request_id,
            ProviderError::TimedOut { after_ms: 3000 },
        ));
        let lines = view.update(&session.snapshot());

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("! The assistant is unavailable"));
    }

    #[test]
    fn blank_submission_is_silent() {
        let mut session = Session::new();
        let err = session.submit_user_message(" ").expect_err("blank");
        assert!(rejection_line(&err).is_none());

        session.submit_user_message("A").expect("submit");
        let err = session.submit_user_message("B").expect_err("busy");
        assert!(rejection_line(&err).is_some());
    }
}
