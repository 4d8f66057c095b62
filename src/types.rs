//! Core types used throughout haggle

use crate::error::{HaggleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session identity assigned by the negotiation endpoint
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new random session ID (used by in-process transports;
    /// the remote endpoint mints its own)
    pub fn generate() -> Self {
        Self(format!("session_{:08x}", rand::random::<u32>()))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-round negotiation context supplied by the seller
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationParams {
    pub product: String,
    pub budget: i64,
}

impl NegotiationParams {
    pub fn new(product: impl Into<String>, budget: i64) -> Self {
        Self {
            product: product.into(),
            budget,
        }
    }

    /// Validate preconditions before any network traffic
    pub fn validate(&self) -> Result<()> {
        if self.product.trim().is_empty() {
            return Err(HaggleError::InvalidInput(
                "product must not be empty".to_string(),
            ));
        }
        if self.budget <= 0 {
            return Err(HaggleError::InvalidInput(format!(
                "budget must be positive, got {}",
                self.budget
            )));
        }
        Ok(())
    }
}

/// The seller's free-text offer for the current round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerOffer {
    pub message: String,
}

impl SellerOffer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(HaggleError::InvalidInput(
                "seller message must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Decision taken by the buyer agent for one round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BuyerAction {
    Accept,
    Counter,
    Reject,
    Ask,
    /// Action this client does not recognize; kept so a newer endpoint
    /// cannot fail an otherwise valid round
    #[serde(other)]
    Unknown,
}

impl fmt::Display for BuyerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuyerAction::Accept => "ACCEPT",
            BuyerAction::Counter => "COUNTER",
            BuyerAction::Reject => "REJECT",
            BuyerAction::Ask => "ASK",
            BuyerAction::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// Structured reply from the buyer agent, stored verbatim in history.
///
/// Fields beyond the known ones are retained in `extra` so replies from a
/// richer endpoint survive a store/replay cycle intact.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuyerReply {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<BuyerAction>,
    #[serde(default)]
    pub offer_price: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BuyerReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: None,
            offer_price: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_action(mut self, action: BuyerAction, offer_price: Option<i64>) -> Self {
        self.action = Some(action);
        self.offer_price = offer_price;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_generation() {
        let id1 = SessionId::generate();
        let id2 = SessionId::generate();

        assert!(id1.0.starts_with("session_"));
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_params_validation() {
        assert!(NegotiationParams::new("Widget", 100).validate().is_ok());

        let err = NegotiationParams::new("  ", 100).validate().unwrap_err();
        assert!(matches!(err, HaggleError::InvalidInput(_)));

        let err = NegotiationParams::new("Widget", -5).validate().unwrap_err();
        assert!(matches!(err, HaggleError::InvalidInput(_)));

        let err = NegotiationParams::new("Widget", 0).validate().unwrap_err();
        assert!(matches!(err, HaggleError::InvalidInput(_)));
    }

    #[test]
    fn test_offer_validation() {
        assert!(SellerOffer::new("I'll take $90").validate().is_ok());
        assert!(SellerOffer::new("   ").validate().is_err());
    }

    #[test]
    fn test_buyer_action_wire_names() {
        let json = serde_json::to_string(&BuyerAction::Counter).unwrap();
        assert_eq!(json, "\"COUNTER\"");

        let action: BuyerAction = serde_json::from_str("\"ACCEPT\"").unwrap();
        assert_eq!(action, BuyerAction::Accept);

        // An action minted by a newer endpoint must not fail the round
        let action: BuyerAction = serde_json::from_str("\"ESCALATE\"").unwrap();
        assert_eq!(action, BuyerAction::Unknown);
    }

    #[test]
    fn test_buyer_reply_retains_unknown_fields() {
        let raw = r#"{
            "message": "Counter: 95",
            "action": "COUNTER",
            "offer_price": 95,
            "confidence": 0.8
        }"#;

        let reply: BuyerReply = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.message, "Counter: 95");
        assert_eq!(reply.action, Some(BuyerAction::Counter));
        assert_eq!(reply.offer_price, Some(95));
        assert_eq!(reply.extra["confidence"], 0.8);

        let round_tripped = serde_json::to_value(&reply).unwrap();
        assert_eq!(round_tripped["confidence"], 0.8);
    }

    #[test]
    fn test_buyer_reply_minimal_shape() {
        // The original endpoint sends offer_price: null on ASK/REJECT
        let raw = r#"{"message": "What is your price?", "action": "ASK", "offer_price": null}"#;
        let reply: BuyerReply = serde_json::from_str(raw).unwrap();

        assert_eq!(reply.action, Some(BuyerAction::Ask));
        assert_eq!(reply.offer_price, None);
        assert!(reply.extra.is_empty());
    }
}
