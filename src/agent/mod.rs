//! Scripted buyer agent for offline negotiation

pub mod buyer;

pub use buyer::BuyerAgent;
