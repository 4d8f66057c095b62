//! In-process transport backed by scripted buyer agents
//!
//! Keeps the same session bookkeeping as the remote endpoint: one agent
//! per session identity, identity minted on first contact, reset discards.

use super::wire::{NegotiateReply, NegotiateRequest};
use super::NegotiationTransport;
use crate::agent::BuyerAgent;
use crate::error::{HaggleError, Result};
use crate::types::SessionId;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Offline stand-in for the remote negotiation endpoint
pub struct LocalTransport {
    sessions: Mutex<HashMap<SessionId, BuyerAgent>>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NegotiationTransport for LocalTransport {
    async fn negotiate(&self, request: &NegotiateRequest) -> Result<NegotiateReply> {
        if request.budget <= 0 {
            return Err(HaggleError::RemoteStatus {
                status: 400,
                detail: "Budget must be positive".to_string(),
            });
        }

        // A caller-supplied identity is honored even if unknown here
        let session_id = request
            .session_id
            .clone()
            .unwrap_or_else(SessionId::generate);

        let mut sessions = self.sessions.lock().await;
        let agent = sessions
            .entry(session_id.clone())
            .or_insert_with(|| BuyerAgent::new(request.product.clone(), request.budget));

        let response = agent.respond(&request.seller_message);

        Ok(NegotiateReply {
            session_id,
            response,
        })
    }

    async fn reset(&self, session_id: &SessionId) -> Result<()> {
        // Unknown identities are not an error; reset is a discard
        self.sessions.lock().await.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn request(message: &str, session_id: Option<SessionId>) -> NegotiateRequest {
        NegotiateRequest {
            product: "Widget".to_string(),
            budget: 100,
            seller_message: message.to_string(),
            session_id,
        }
    }

    #[tokio::test]
    async fn test_mints_identity_on_first_round() {
        let transport = LocalTransport::new();

        let reply = assert_ok!(transport.negotiate(&request("I'll take 80", None)).await);

        assert!(reply.session_id.0.starts_with("session_"));
        assert_eq!(transport.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_identity_stable_across_rounds() {
        let transport = LocalTransport::new();

        let first = assert_ok!(transport.negotiate(&request("How about 95?", None)).await);
        let second = assert_ok!(
            transport
                .negotiate(&request("Still 95", Some(first.session_id.clone())))
                .await
        );

        assert_eq!(first.session_id, second.session_id);
        assert_eq!(transport.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_honors_caller_supplied_identity() {
        let transport = LocalTransport::new();
        let supplied = SessionId("carried-over".to_string());

        let reply = assert_ok!(
            transport
                .negotiate(&request("I'll take 80", Some(supplied.clone())))
                .await
        );

        assert_eq!(reply.session_id, supplied);
    }

    #[tokio::test]
    async fn test_rejects_non_positive_budget() {
        let transport = LocalTransport::new();
        let mut bad = request("I'll take 80", None);
        bad.budget = 0;

        let err = assert_err!(transport.negotiate(&bad).await);
        assert!(matches!(
            err,
            HaggleError::RemoteStatus { status: 400, .. }
        ));
        assert_eq!(transport.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_reset_drops_session_and_is_idempotent() {
        let transport = LocalTransport::new();

        let reply = assert_ok!(transport.negotiate(&request("How about 95?", None)).await);
        assert_eq!(transport.session_count().await, 1);

        assert_ok!(transport.reset(&reply.session_id).await);
        assert_eq!(transport.session_count().await, 0);

        // Resetting an already-gone session still succeeds
        assert_ok!(transport.reset(&reply.session_id).await);
    }
}
