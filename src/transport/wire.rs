//! Wire messages exchanged with the negotiation endpoint

use crate::types::{BuyerReply, SessionId};
use serde::{Deserialize, Serialize};

/// Request for one negotiation round (client -> remote)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiateRequest {
    pub product: String,
    pub budget: i64,
    pub seller_message: String,
    /// `None` asks the remote side to start a new session
    pub session_id: Option<SessionId>,
}

/// Successful negotiation reply (remote -> client)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiateReply {
    pub session_id: SessionId,
    pub response: BuyerReply,
}

/// Request to discard a session on the remote side
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResetRequest {
    pub session_id: SessionId,
}
