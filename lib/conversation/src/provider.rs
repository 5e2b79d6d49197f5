//! Response provider abstraction.
//!
//! A provider turns the conversation so far into assistant reply text. The
//! session makes no assumption about latency or determinism, and a provider
//! may never answer at all. Today the only implementation is
//! [`CannedResponder`]; a model-backed provider plugs in through the same
//! trait.

use crate::error::ProviderError;
use crate::message::Message;
use async_trait::async_trait;
use finsmart_core::RequestId;
use std::time::Duration;
use tracing::debug;

/// Trait for assistant reply generators.
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Generates a reply to the last message of `conversation`.
    ///
    /// `request_id` identifies the request for logging and correlation; the
    /// caller attaches it to the delivery.
    ///
    /// # Errors
    ///
    /// Returns an error if no reply could be produced.
    async fn generate(
        &self,
        request_id: RequestId,
        conversation: &[Message],
    ) -> Result<String, ProviderError>;

    /// Short name used in log fields.
    fn name(&self) -> &str;
}

/// Stand-in provider that answers every request with the same text after a
/// fixed delay.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    reply: String,
    delay: Duration,
}

impl CannedResponder {
    /// The reply used when none is configured.
    pub const DEFAULT_REPLY: &'static str = "Based on your spending patterns, I recommend \
        reducing dining expenses by ₹2,000/month. You can also invest ₹4,000 this month in \
        mutual funds for better returns.";

    /// The simulated "thinking" time used when none is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    /// Creates a responder that answers with `reply` after `delay`.
    #[must_use]
    pub fn new(reply: impl Into<String>, delay: Duration) -> Self {
        Self {
            reply: reply.into(),
            delay,
        }
    }

    /// Returns the configured reply text.
    #[must_use]
    pub fn reply(&self) -> &str {
        &self.reply
    }

    /// Returns the simulated thinking time.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REPLY, Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl ResponseProvider for CannedResponder {
    async fn generate(
        &self,
        request_id: RequestId,
        conversation: &[Message],
    ) -> Result<String, ProviderError> {
        debug!(
            %request_id,
            history_len = conversation.len(),
            delay_ms = millis(self.delay),
            "composing canned reply"
        );
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "canned"
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn default_matches_dashboard_reply() {
        let responder = CannedResponder::default();
        assert!(responder.reply().contains("₹2,000/month"));
        assert_eq!(responder.delay(), Duration::from_millis(1500));
    }

    #[test]
    fn millis_saturates_instead_of_wrapping() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn canned_reply_waits_for_its_delay() {
        let responder = CannedResponder::new("Save more.", Duration::from_secs(3));
        let started = Instant::now();

        let reply = responder
            .generate(RequestId::new(), &[])
            .await
            .expect("canned reply");

        assert_eq!(reply, "Save more.");
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn canned_reply_ignores_history() {
        let responder = CannedResponder::new("Same answer.", Duration::ZERO);
        let mut session = crate::session::Session::new();
        let pending = session.submit_user_message("Anything").expect("submit");

        let reply = responder
            .generate(pending.request_id, &pending.conversation)
            .await
            .expect("canned reply");

        assert_eq!(reply, "Same answer.");
    }
}
