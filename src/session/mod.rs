//! Session module: identity, round history, and the submit state machine

pub mod controller;
pub mod types;

pub use controller::SessionController;
pub use types::{NegotiationRound, RoundEvent};
