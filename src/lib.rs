//! haggle - seller-side client for turn-based price negotiation
//!
//! One `SessionController` owns a negotiation session end-to-end: it
//! submits seller offers to a buyer agent behind the `NegotiationTransport`
//! boundary, keeps the ordered round history, and reports round lifecycle
//! events for a presentation layer to render. Two transports ship: an HTTP
//! client for a remote negotiation endpoint and an in-process one backed by
//! a scripted buyer agent.

pub mod agent;
pub mod cli;
pub mod error;
pub mod session;
pub mod transport;
pub mod types;

pub use error::{HaggleError, Result};
pub use session::{NegotiationRound, RoundEvent, SessionController};
pub use transport::{HttpTransport, LocalTransport, NegotiationTransport};
pub use types::{BuyerAction, BuyerReply, NegotiationParams, SellerOffer, SessionId};
