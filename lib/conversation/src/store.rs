//! Append-only message log.

use crate::error::SessionError;
use crate::message::{Message, MessageId, Sender};

/// Ordered, append-only transcript.
///
/// Insertion order is chronological order is display order. There is no
/// way to edit or remove a message once appended.
#[derive(Debug, Clone)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_id: MessageId,
}

impl MessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: MessageId::FIRST,
        }
    }

    /// Appends a message with a fresh id and the current time.
    ///
    /// The stored text is `text` trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] if `text` is empty after
    /// trimming. The store is unchanged in that case.
    pub fn append(&mut self, sender: Sender, text: &str) -> Result<Message, SessionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SessionError::empty_text());
        }

        Ok(self.push(sender, trimmed.to_string()))
    }

    /// Appends without validation. `text` must already be trimmed and
    /// non-empty.
    pub(crate) fn push(&mut self, sender: Sender, text: String) -> Message {
        let message = Message::new(self.next_id, sender, text);
        self.next_id = self.next_id.next();
        self.messages.push(message.clone());
        message
    }

    /// Iterates the log in order.
    ///
    /// Each call starts a fresh pass over the current contents.
    pub fn all(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Returns the message with the given id, if it exists.
    #[must_use]
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages
            .binary_search_by_key(&id, Message::id)
            .ok()
            .map(|idx| &self.messages[idx])
    }

    /// Returns the most recently appended message.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Copies the log, e.g. to hand the conversation to a provider task.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Message> {
        self.messages.clone()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}
