//! Assistant conversation for the FinSmart dashboard.
//!
//! This crate provides:
//!
//! - **Message Store**: append-only, ordered transcript
//! - **Session**: idle/awaiting state machine with request-id matching
//! - **Response Provider**: pluggable reply generator and the canned default
//! - **Session Controller**: async driver that dispatches requests and
//!   publishes view snapshots

pub mod config;
pub mod controller;
pub mod error;
pub mod message;
pub mod provider;
pub mod session;
pub mod store;

pub use config::AssistantConfig;
pub use controller::SessionController;
pub use error::{ControllerError, ProviderError, SessionError};
pub use message::{Message, MessageId, Sender};
pub use provider::{CannedResponder, ResponseProvider};
pub use session::{
    ComposingState, Notice, PendingRequest, ResponseDelivery, ResponseOutcome, Session,
    SessionSnapshot,
};
pub use store::MessageStore;
