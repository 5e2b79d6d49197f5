//! Error types for the conversation crate.
//!
//! Errors are plain domain enums; callers at the application edge wrap them
//! in rootcause reports with their own context:
//! - `SessionError`: rejected submissions and state transitions
//! - `ProviderError`: failures reported by a response provider
//! - `ControllerError`: the session controller could not be built

use crate::session::ComposingState;
use std::fmt;

/// Errors from session operations.
///
/// Neither variant changes the session: the log and composing state are
/// exactly as they were before the rejected call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Submitted text was empty after trimming.
    Validation { reason: String },
    /// The operation is not allowed in the current composing state.
    InvalidState {
        operation: &'static str,
        state: ComposingState,
    },
}

impl SessionError {
    pub(crate) fn empty_text() -> Self {
        Self::Validation {
            reason: "message text is empty".to_string(),
        }
    }

    /// Returns true if this is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { reason } => write!(f, "invalid message: {reason}"),
            Self::InvalidState { operation, state } => {
                write!(f, "cannot {operation} while session is {state}")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors from response providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider could not be reached.
    Unavailable { reason: String },
    /// The provider answered but generation failed.
    Failed { reason: String },
    /// No reply arrived within the configured limit.
    TimedOut { after_ms: u64 },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "assistant unavailable: {reason}"),
            Self::Failed { reason } => write!(f, "reply generation failed: {reason}"),
            Self::TimedOut { after_ms } => {
                write!(f, "assistant did not reply within {after_ms}ms")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Errors from building a session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// No Tokio runtime was running where the controller was created.
    NoRuntime { reason: String },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRuntime { reason } => {
                write!(f, "session controller needs a Tokio runtime: {reason}")
            }
        }
    }
}

impl std::error::Error for ControllerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_display_names_operation_and_state() {
        let err = SessionError::InvalidState {
            operation: "submit a message",
            state: ComposingState::AwaitingResponse,
        };
        let text = err.to_string();
        assert!(text.contains("submit a message"));
        assert!(text.contains("awaiting response"));
    }

    #[test]
    fn validation_error_is_flagged() {
        assert!(SessionError::empty_text().is_validation());
        assert!(
            !SessionError::InvalidState {
                operation: "cancel",
                state: ComposingState::Idle,
            }
            .is_validation()
        );
    }

    #[test]
    fn provider_timeout_display() {
        let err = ProviderError::TimedOut { after_ms: 2500 };
        assert!(err.to_string().contains("2500ms"));
    }

    #[test]
    fn no_runtime_display_keeps_reason() {
        let err = ControllerError::NoRuntime {
            reason: "no reactor running".to_string(),
        };
        assert!(err.to_string().contains("no reactor running"));
    }
}
