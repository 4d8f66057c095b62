//! Session round history and lifecycle events

use crate::types::{BuyerReply, SellerOffer};
use serde::{Deserialize, Serialize};

/// One completed seller-offer/buyer-reply exchange
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiationRound {
    /// 1-indexed position within the session, gap-free
    pub round: u32,
    pub seller_offer: SellerOffer,
    pub buyer_reply: BuyerReply,
}

/// Round lifecycle notifications for a presentation layer.
///
/// The controller emits these through an optional sink; it never assumes a
/// particular rendering mechanism.
#[derive(Clone, Debug)]
pub enum RoundEvent {
    /// A round was submitted and a reply is awaited
    Started { round: u32 },
    /// The round resolved with a buyer reply
    Resolved { round: u32, reply: BuyerReply },
    /// The round failed; session state is unchanged
    Failed { round: u32, reason: String },
    /// The session was reset; history is empty again
    SessionReset,
}
