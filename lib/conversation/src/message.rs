//! Message types for the assistant transcript.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::fmt;

/// Per-session message sequence number.
///
/// The seeded greeting is always `msg_1`; every appended message gets the
/// next number, so ids order the same way as the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    /// The id given to the first message of a session.
    pub const FIRST: Self = Self(1);

    /// Returns the sequence number.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg_{}", self.0)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person using the dashboard.
    User,
    /// The financial assistant.
    Assistant,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Assistant => f.write_str("assistant"),
        }
    }
}

/// One immutable turn in the conversation.
///
/// Messages are only created by [`MessageStore`](crate::store::MessageStore),
/// which assigns the id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    id: MessageId,
    sender: Sender,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(id: MessageId, sender: Sender, text: String) -> Self {
        Self {
            id,
            sender,
            text,
            timestamp: Utc::now(),
        }
    }

    /// Returns the message ID.
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns who wrote the message.
    #[must_use]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the trimmed message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the store appended this message.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Formats the timestamp as local `HH:MM` for transcript display.
    #[must_use]
    pub fn display_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_sequence() {
        let first = MessageId::FIRST;
        assert_eq!(first.get(), 1);
        assert_eq!(first.next().get(), 2);
        assert!(first < first.next());
        assert_eq!(first.next().to_string(), "msg_2");
    }

    #[test]
    fn display_time_is_two_digit_hours_and_minutes() {
        let msg = Message::new(MessageId::FIRST, Sender::User, "hi".to_string());
        let shown = msg.display_time();
        assert_eq!(shown.len(), 5);
        assert_eq!(&shown[2..3], ":");
    }

    #[test]
    fn message_serializes_lowercase_sender() {
        let msg = Message::new(MessageId::FIRST, Sender::Assistant, "Hello".to_string());
        let json = serde_json::to_value(&msg).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["sender"], "assistant");
        assert_eq!(json["text"], "Hello");
    }
}
