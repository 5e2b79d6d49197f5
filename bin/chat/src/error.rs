//! Domain error types for the chat front end.
//!
//! Lower-level errors are converted into these variants with `map_err` and
//! propagated as rootcause reports.

use std::fmt;

/// Errors that end the chat front end.
#[derive(Debug)]
pub enum ChatError {
    /// Configuration could not be loaded or is invalid.
    Config { details: String },
    /// Reading from or writing to the terminal failed.
    Terminal { details: String },
    /// The transcript could not be exported.
    Export { details: String },
    /// The session controller could not start.
    Runtime { details: String },
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { details } => write!(f, "invalid configuration: {details}"),
            Self::Terminal { details } => write!(f, "terminal I/O failed: {details}"),
            Self::Export { details } => write!(f, "transcript export failed: {details}"),
            Self::Runtime { details } => write!(f, "session could not start: {details}"),
        }
    }
}

impl std::error::Error for ChatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ChatError::Config {
            details: "greeting is blank".to_string(),
        };
        assert!(err.to_string().contains("greeting is blank"));
    }
}
