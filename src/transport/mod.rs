//! Transport boundary for reaching the remote negotiation agent

pub mod http;
pub mod local;
pub mod wire;

pub use http::HttpTransport;
pub use local::LocalTransport;
pub use wire::{NegotiateRequest, NegotiateReply, ResetRequest};

use crate::error::Result;
use crate::types::SessionId;
use async_trait::async_trait;

/// Common interface for negotiation transports.
///
/// The session controller depends only on this contract, not on wire
/// details; implementations may use any transport.
#[async_trait]
pub trait NegotiationTransport: Send + Sync {
    /// Submit one negotiation round and await the buyer's reply
    async fn negotiate(&self, request: &NegotiateRequest) -> Result<NegotiateReply>;

    /// Discard a session on the remote side
    async fn reset(&self, session_id: &SessionId) -> Result<()>;
}
