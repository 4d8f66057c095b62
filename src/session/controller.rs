//! Session controller: the submit/await/resolve state machine

use crate::error::{HaggleError, Result};
use crate::session::types::{NegotiationRound, RoundEvent};
use crate::transport::{NegotiateRequest, NegotiationTransport};
use crate::types::{BuyerReply, NegotiationParams, SellerOffer, SessionId};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Owns one negotiation session: its identity, its round history, and the
/// rule that at most one round is in flight at a time.
///
/// Cloning shares the same session. A second `submit_offer` while one is
/// in flight fails fast with `SessionBusy`, as does `reset_session`; an
/// in-flight round is never aborted.
#[derive(Clone)]
pub struct SessionController {
    transport: Arc<dyn NegotiationTransport>,
    state: Arc<Mutex<SessionState>>,
    events: Option<mpsc::UnboundedSender<RoundEvent>>,
}

#[derive(Default)]
struct SessionState {
    session_id: Option<SessionId>,
    rounds: Vec<NegotiationRound>,
    awaiting_reply: bool,
}

impl SessionController {
    pub fn new(transport: Arc<dyn NegotiationTransport>) -> Self {
        Self {
            transport,
            state: Arc::new(Mutex::new(SessionState::default())),
            events: None,
        }
    }

    /// Create a controller that reports round lifecycle events through the
    /// given sink. Send failures are ignored; the sink is presentation-only.
    pub fn with_event_sink(
        transport: Arc<dyn NegotiationTransport>,
        events: mpsc::UnboundedSender<RoundEvent>,
    ) -> Self {
        Self {
            transport,
            state: Arc::new(Mutex::new(SessionState::default())),
            events: Some(events),
        }
    }

    /// Submit one seller offer and await the buyer's reply.
    ///
    /// On success the returned session identity is adopted (the remote
    /// side is authoritative) and the round is appended to history. On any
    /// failure, identity and history are left exactly as they were.
    pub async fn submit_offer(
        &self,
        params: &NegotiationParams,
        offer: &SellerOffer,
    ) -> Result<BuyerReply> {
        params.validate()?;
        offer.validate()?;

        let (session_id, round) = {
            let mut state = self.state.lock().await;
            if state.awaiting_reply {
                return Err(HaggleError::SessionBusy);
            }
            state.awaiting_reply = true;
            (state.session_id.clone(), state.rounds.len() as u32 + 1)
        };

        self.emit(RoundEvent::Started { round });

        let request = NegotiateRequest {
            product: params.product.clone(),
            budget: params.budget,
            seller_message: offer.message.clone(),
            session_id,
        };

        let outcome = self.transport.negotiate(&request).await;

        let mut state = self.state.lock().await;
        state.awaiting_reply = false;

        match outcome {
            Ok(reply) => {
                if let Some(previous) = &state.session_id {
                    if *previous != reply.session_id {
                        tracing::debug!(
                            "Session identity changed from {} to {}",
                            previous,
                            reply.session_id
                        );
                    }
                }
                state.session_id = Some(reply.session_id);
                state.rounds.push(NegotiationRound {
                    round,
                    seller_offer: offer.clone(),
                    buyer_reply: reply.response.clone(),
                });
                drop(state);

                tracing::info!("Round {} resolved", round);
                self.emit(RoundEvent::Resolved {
                    round,
                    reply: reply.response.clone(),
                });
                Ok(reply.response)
            }
            Err(e) => {
                drop(state);

                tracing::warn!("Round {} failed: {}", round, e);
                self.emit(RoundEvent::Failed {
                    round,
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Discard the session locally and, best-effort, remotely.
    ///
    /// A failure from the remote reset is logged and ignored; the session
    /// is being abandoned either way. Fails only with `SessionBusy` while
    /// a round is in flight.
    pub async fn reset_session(&self) -> Result<()> {
        let session_id = {
            let state = self.state.lock().await;
            if state.awaiting_reply {
                return Err(HaggleError::SessionBusy);
            }
            state.session_id.clone()
        };

        if let Some(id) = &session_id {
            if let Err(e) = self.transport.reset(id).await {
                tracing::warn!("Remote reset failed for session {}: {}", id, e);
            }
        }

        let mut state = self.state.lock().await;
        state.session_id = None;
        state.rounds.clear();
        drop(state);

        self.emit(RoundEvent::SessionReset);
        Ok(())
    }

    /// Snapshot of the round history, oldest first
    pub async fn history(&self) -> Vec<NegotiationRound> {
        self.state.lock().await.rounds.clone()
    }

    /// Current session identity, `None` when no session is active
    pub async fn session_id(&self) -> Option<SessionId> {
        self.state.lock().await.session_id.clone()
    }

    fn emit(&self, event: RoundEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}
