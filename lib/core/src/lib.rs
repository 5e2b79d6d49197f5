//! Core types shared across the FinSmart workspace.
//!
//! This crate provides the strongly-typed identifiers and the rootcause-based
//! `Result` alias used by the conversation library and the chat binary.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, RequestId, SessionId};
