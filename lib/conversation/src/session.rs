//! Assistant conversation session.
//!
//! A [`Session`] is a synchronous state machine over a [`MessageStore`].
//! It never performs I/O: a successful submission returns a
//! [`PendingRequest`] that the owner hands to a response provider, and the
//! provider's answer comes back through [`Session::apply_response`]. Replies
//! are matched to requests by [`RequestId`], so a late answer to a cancelled
//! request can never land in the transcript.

use crate::error::{ProviderError, SessionError};
use crate::message::{Message, Sender};
use crate::store::MessageStore;
use finsmart_core::{RequestId, SessionId};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Whether an assistant reply is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposingState {
    /// No request in flight; the session accepts submissions.
    Idle,
    /// A reply is outstanding; the view shows the typing indicator.
    AwaitingResponse,
}

impl ComposingState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true while the typing indicator should be shown.
    #[must_use]
    pub fn is_composing(&self) -> bool {
        matches!(self, Self::AwaitingResponse)
    }
}

impl fmt::Display for ComposingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::AwaitingResponse => f.write_str("awaiting response"),
        }
    }
}

/// A recoverable condition the view should show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The last request failed; the user may try again.
    AssistantUnavailable { reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssistantUnavailable { reason } => {
                write!(f, "The assistant is unavailable right now ({reason}).")
            }
        }
    }
}

/// A request the session has accepted and is waiting on.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    /// Correlation id the reply must carry.
    pub request_id: RequestId,
    /// The full log at request time, ending with the new user message.
    pub conversation: Vec<Message>,
}

/// A provider's answer to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDelivery {
    pub request_id: RequestId,
    pub outcome: Result<String, ProviderError>,
}

impl ResponseDelivery {
    /// A successful reply.
    #[must_use]
    pub fn reply(request_id: RequestId, text: impl Into<String>) -> Self {
        Self {
            request_id,
            outcome: Ok(text.into()),
        }
    }

    /// A failed generation.
    #[must_use]
    pub fn failure(request_id: RequestId, error: ProviderError) -> Self {
        Self {
            request_id,
            outcome: Err(error),
        }
    }
}

/// What applying a delivery did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The reply matched the pending request and was appended.
    Applied(Message),
    /// The pending request failed; the session is idle again.
    Failed(ProviderError),
    /// The delivery did not match the pending request and was dropped.
    Discarded { request_id: RequestId },
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub messages: Vec<Message>,
    pub composing_state: ComposingState,
    pub notice: Option<Notice>,
}

/// One user's conversation with the assistant.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    store: MessageStore,
    composing_state: ComposingState,
    pending_request_id: Option<RequestId>,
    notice: Option<Notice>,
}

impl Session {
    /// Greeting seeded into every new session unless another is configured.
    pub const DEFAULT_GREETING: &'static str =
        "Hello! I'm your AI financial advisor. How can I help you today?";

    /// Creates an idle session seeded with [`Self::DEFAULT_GREETING`].
    #[must_use]
    pub fn new() -> Self {
        let mut store = MessageStore::new();
        store.push(Sender::Assistant, Self::DEFAULT_GREETING.to_string());
        Self::from_store(store)
    }

    /// Creates an idle session seeded with a custom greeting.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] if the greeting is blank.
    pub fn with_greeting(greeting: &str) -> Result<Self, SessionError> {
        let mut store = MessageStore::new();
        store.append(Sender::Assistant, greeting)?;
        Ok(Self::from_store(store))
    }

    fn from_store(store: MessageStore) -> Self {
        Self {
            id: SessionId::new(),
            store,
            composing_state: ComposingState::Idle,
            pending_request_id: None,
            notice: None,
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the composing state.
    #[must_use]
    pub fn state(&self) -> ComposingState {
        self.composing_state
    }

    /// Returns the ID of the outstanding request, if any.
    #[must_use]
    pub fn pending_request_id(&self) -> Option<RequestId> {
        self.pending_request_id
    }

    /// Returns the notice left by the last failed request.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Iterates the transcript in display order.
    pub fn messages(&self) -> std::slice::Iter<'_, Message> {
        self.store.all()
    }

    /// Returns the number of messages in the transcript.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.store.len()
    }

    /// Returns the most recent message.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.store.last()
    }

    /// Accepts a user message and opens a response request for it.
    ///
    /// Only one request may be outstanding: submissions while awaiting a
    /// reply are rejected rather than queued.
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidState`] if a reply is already outstanding.
    /// - [`SessionError::Validation`] if `text` is blank.
    ///
    /// The session is unchanged on error.
    pub fn submit_user_message(&mut self, text: &str) -> Result<PendingRequest, SessionError> {
        if self.composing_state.is_composing() {
            return Err(SessionError::InvalidState {
                operation: "submit a message",
                state: self.composing_state,
            });
        }

        let message = self.store.append(Sender::User, text)?;
        let request_id = RequestId::new();

        self.composing_state = ComposingState::AwaitingResponse;
        self.pending_request_id = Some(request_id);
        self.notice = None;

        info!(
            session_id = %self.id,
            %request_id,
            message_id = %message.id(),
            "user message accepted"
        );

        Ok(PendingRequest {
            request_id,
            conversation: self.store.to_vec(),
        })
    }

    /// Applies a provider delivery.
    ///
    /// Deliveries whose id is not the pending request (stale, cancelled, or
    /// arriving while idle) are dropped without touching the session.
    pub fn apply_response(&mut self, delivery: ResponseDelivery) -> ResponseOutcome {
        let ResponseDelivery {
            request_id,
            outcome,
        } = delivery;

        if self.pending_request_id != Some(request_id) {
            debug!(session_id = %self.id, %request_id, "discarding stale delivery");
            return ResponseOutcome::Discarded { request_id };
        }

        let error = match outcome {
            Ok(text) => match self.store.append(Sender::Assistant, &text) {
                Ok(message) => {
                    self.settle();
                    info!(
                        session_id = %self.id,
                        %request_id,
                        message_id = %message.id(),
                        "assistant reply applied"
                    );
                    return ResponseOutcome::Applied(message);
                }
                Err(_) => ProviderError::Failed {
                    reason: "provider returned an empty reply".to_string(),
                },
            },
            Err(error) => error,
        };

        self.settle();
        warn!(session_id = %self.id, %request_id, %error, "assistant reply failed");
        self.notice = Some(Notice::AssistantUnavailable {
            reason: error.to_string(),
        });
        ResponseOutcome::Failed(error)
    }

    /// Abandons the outstanding request.
    ///
    /// The provider is not interrupted; its eventual delivery is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] if nothing is pending.
    pub fn cancel_pending(&mut self) -> Result<RequestId, SessionError> {
        let Some(request_id) = self.pending_request_id else {
            return Err(SessionError::InvalidState {
                operation: "cancel",
                state: self.composing_state,
            });
        };

        self.settle();
        debug!(session_id = %self.id, %request_id, "pending request cancelled");
        Ok(request_id)
    }

    /// Returns a copy of everything the view renders.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            messages: self.store.to_vec(),
            composing_state: self.composing_state,
            notice: self.notice.clone(),
        }
    }

    fn settle(&mut self) {
        self.composing_state = ComposingState::Idle;
        self.pending_request_id = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
