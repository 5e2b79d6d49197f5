//! Async driver for a [`Session`].
//!
//! The controller is owned by whatever renders the conversation. It spawns
//! one provider task per accepted submission and receives the results on an
//! mpsc channel. Results are applied only when the owner awaits
//! [`SessionController::next_event`], so the session is never mutated from
//! more than one place. After every change a fresh [`SessionSnapshot`] is
//! published on a watch channel.
//!
//! Deliveries queue until `next_event` takes them, including stale ones
//! left behind by a cancel. Owners should keep polling `next_event` for as
//! long as the session lives, e.g. by racing it against user input.

use crate::error::{ControllerError, ProviderError, SessionError};
use crate::provider::{ResponseProvider, millis};
use crate::session::{PendingRequest, ResponseDelivery, ResponseOutcome, Session, SessionSnapshot};
use finsmart_core::RequestId;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

/// Owns a session and routes its requests to a response provider.
pub struct SessionController {
    session: Session,
    provider: Arc<dyn ResponseProvider>,
    runtime: Handle,
    response_timeout: Option<Duration>,
    deliveries_tx: mpsc::UnboundedSender<ResponseDelivery>,
    deliveries_rx: mpsc::UnboundedReceiver<ResponseDelivery>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl SessionController {
    /// Creates a controller around `session`.
    ///
    /// Provider tasks are spawned on the Tokio runtime that is current
    /// here, so [`Self::submit`] also works outside the runtime context.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NoRuntime`] if called outside a Tokio
    /// runtime.
    pub fn new(
        session: Session,
        provider: Arc<dyn ResponseProvider>,
    ) -> Result<Self, ControllerError> {
        let runtime = Handle::try_current().map_err(|e| ControllerError::NoRuntime {
            reason: e.to_string(),
        })?;
        let (deliveries_tx, deliveries_rx) = mpsc::unbounded_channel();
        let (snapshots, _) = watch::channel(session.snapshot());
        Ok(Self {
            session,
            provider,
            runtime,
            response_timeout: None,
            deliveries_tx,
            deliveries_rx,
            snapshots,
        })
    }

    /// Fails requests that take longer than `timeout` to answer.
    #[must_use]
    pub fn with_response_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Returns the session being driven.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the current view state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribes to view state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Submits user input and dispatches a response request.
    ///
    /// Returns as soon as the request is dispatched; the reply arrives
    /// through [`Self::next_event`].
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] from the session. Nothing is dispatched
    /// or published in that case.
    #[instrument(skip(self, text), fields(session_id = %self.session.id()))]
    pub fn submit(&mut self, text: &str) -> Result<RequestId, SessionError> {
        let pending = self.session.submit_user_message(text)?;
        let request_id = pending.request_id;
        self.publish();
        self.dispatch(pending);
        Ok(request_id)
    }

    /// Abandons the outstanding request.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] if nothing is pending.
    pub fn cancel_pending(&mut self) -> Result<RequestId, SessionError> {
        let request_id = self.session.cancel_pending()?;
        self.publish();
        Ok(request_id)
    }

    /// Waits for the next provider delivery and applies it.
    ///
    /// Stale deliveries are reported as [`ResponseOutcome::Discarded`] and
    /// leave the session untouched. If no provider task is running this
    /// waits forever, so callers usually race it against user input.
    ///
    /// Deliveries are buffered without bound until taken here. Keep polling
    /// for the controller's whole lifetime, not only while a request is
    /// pending, or abandoned replies pile up.
    #[instrument(skip(self), fields(session_id = %self.session.id()))]
    pub async fn next_event(&mut self) -> ResponseOutcome {
        // The controller holds a sender, so the channel never closes.
        let delivery = match self.deliveries_rx.recv().await {
            Some(delivery) => delivery,
            None => return std::future::pending().await,
        };
        self.apply(delivery)
    }

    /// Waits until the pending request is answered, failed, or timed out.
    ///
    /// Returns `None` immediately if the session is idle.
    pub async fn run_until_idle(&mut self) -> Option<ResponseOutcome> {
        while self.session.state().is_composing() {
            match self.next_event().await {
                ResponseOutcome::Discarded { .. } => continue,
                outcome => return Some(outcome),
            }
        }
        None
    }

    /// Applies a delivery that arrived by some other route.
    pub fn apply(&mut self, delivery: ResponseDelivery) -> ResponseOutcome {
        let outcome = self.session.apply_response(delivery);
        if !matches!(outcome, ResponseOutcome::Discarded { .. }) {
            self.publish();
        }
        outcome
    }

    /// Tears the session down, cancelling any outstanding request.
    pub fn shutdown(mut self) -> Session {
        if let Ok(request_id) = self.session.cancel_pending() {
            debug!(session_id = %self.session.id(), %request_id, "cancelled on shutdown");
            self.publish();
        }
        self.session
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.session.snapshot());
    }

    fn dispatch(&self, pending: PendingRequest) {
        let PendingRequest {
            request_id,
            conversation,
        } = pending;
        let provider = Arc::clone(&self.provider);
        let deliveries = self.deliveries_tx.clone();
        let timeout = self.response_timeout;

        debug!(%request_id, provider = provider.name(), "dispatching response request");

        self.runtime.spawn(async move {
            let generation = provider.generate(request_id, &conversation);
            let outcome = match timeout {
                Some(limit) => tokio::time::timeout(limit, generation)
                    .await
                    .unwrap_or_else(|_| {
                        Err(ProviderError::TimedOut {
                            after_ms: millis(limit),
                        })
                    }),
                None => generation.await,
            };

            if deliveries
                .send(ResponseDelivery {
                    request_id,
                    outcome,
                })
                .is_err()
            {
                debug!(%request_id, "session gone before delivery");
            }
        });
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session", &self.session)
            .field("provider", &self.provider.name())
            .field("response_timeout", &self.response_timeout)
            .finish_non_exhaustive()
    }
}
