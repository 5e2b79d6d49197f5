//! Assistant configuration.
//!
//! Applications compose [`AssistantConfig`] into their own configuration
//! and deserialize it with the `config` crate. Every field has a default,
//! so an empty source yields the dashboard's stock assistant.

use crate::error::SessionError;
use crate::provider::CannedResponder;
use crate::session::Session;
use serde::Deserialize;
use std::time::Duration;

/// Settings for the assistant session and its default provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Assistant message seeded into every new session.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Text returned by the canned responder.
    #[serde(default = "default_reply_text")]
    pub reply_text: String,

    /// Simulated thinking time of the canned responder, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Give up on a reply after this many milliseconds.
    /// Unset means wait indefinitely.
    #[serde(default)]
    pub response_timeout_ms: Option<u64>,
}

fn default_greeting() -> String {
    Session::DEFAULT_GREETING.to_string()
}

fn default_reply_text() -> String {
    CannedResponder::DEFAULT_REPLY.to_string()
}

fn default_reply_delay_ms() -> u64 {
    1500
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            reply_text: default_reply_text(),
            reply_delay_ms: default_reply_delay_ms(),
            response_timeout_ms: None,
        }
    }
}

impl AssistantConfig {
    /// Returns the canned responder delay.
    #[must_use]
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Returns the reply timeout, if one is configured.
    #[must_use]
    pub fn response_timeout(&self) -> Option<Duration> {
        self.response_timeout_ms.map(Duration::from_millis)
    }

    /// Builds a session seeded with the configured greeting.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Validation`] if the greeting is blank.
    pub fn new_session(&self) -> Result<Session, SessionError> {
        Session::with_greeting(&self.greeting)
    }

    /// Builds the canned responder described by this configuration.
    #[must_use]
    pub fn canned_responder(&self) -> CannedResponder {
        CannedResponder::new(self.reply_text.clone(), self.reply_delay())
    }
}
