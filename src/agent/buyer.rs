//! Heuristic buyer agent
//!
//! Decides one buyer reply per seller message: extract a price from free
//! text, then accept, counter, reject, or ask depending on how the price
//! sits against the budget and how far the negotiation has progressed.

use crate::types::{BuyerAction, BuyerReply};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;

// TODO: accept ungrouped amounts above 999; "1500" currently parses as 150
static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:₹|rs|inr)?\s*(\d{1,3}(?:,\d{3})*)").expect("valid price pattern"));

static COUNTER_TEMPLATES: [&str; 4] = [
    "My research suggests ₹{offer} would be a fair price. What do you think?",
    "I can do ₹{offer} based on current market rates.",
    "Would ₹{offer} work for you? That aligns better with my budget.",
    "Given the specs, I believe ₹{offer} is reasonable. Your thoughts?",
];

/// Budget-conscious buyer for one negotiation session
pub struct BuyerAgent {
    product: String,
    budget: i64,
    rounds: u32,
    transcript: Vec<String>,
}

impl BuyerAgent {
    pub fn new(product: impl Into<String>, budget: i64) -> Self {
        Self {
            product: product.into(),
            budget,
            rounds: 0,
            transcript: Vec::new(),
        }
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    /// Rounds handled so far, including the one currently being answered
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Both sides of the conversation, in order
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Produce the buyer's reply to one seller message
    pub fn respond(&mut self, seller_message: &str) -> BuyerReply {
        self.rounds += 1;
        self.transcript
            .push(format!("Seller (Round {}): {}", self.rounds, seller_message));

        let lowered = seller_message.to_lowercase();
        let offer_price = parse_price(&lowered);
        let is_final = lowered.contains("final");
        let is_urgent = ["soon", "quick", "immediate"]
            .iter()
            .any(|word| lowered.contains(word));

        let reply = match offer_price {
            Some(price) => self.decide_on_price(price, is_final, is_urgent),
            None => {
                if is_final {
                    BuyerReply::new("Without a clear price, I'll need to decline. Thank you.")
                        .with_action(BuyerAction::Reject, None)
                } else {
                    BuyerReply::new("Could you please specify your asking price for the product?")
                        .with_action(BuyerAction::Ask, None)
                }
            }
        };

        self.transcript.push(format!("Buyer: {}", reply.message));
        reply
    }

    fn decide_on_price(&self, price: i64, is_final: bool, is_urgent: bool) -> BuyerReply {
        let budget = self.budget as f64;

        if price as f64 <= budget * 0.85 {
            // Well under budget, take it
            return BuyerReply::new(format!(
                "Excellent! I accept ₹{}. Let's proceed with the paperwork.",
                price
            ))
            .with_action(BuyerAction::Accept, Some(price));
        }

        if price <= self.budget {
            if self.rounds >= 3 || is_final {
                return BuyerReply::new(format!(
                    "I'll accept your ₹{} offer to conclude this deal.",
                    price
                ))
                .with_action(BuyerAction::Accept, Some(price));
            }

            let counter = ((price as f64 * 0.93) as i64).max((budget * 0.95) as i64);
            return BuyerReply::new(counter_message(counter))
                .with_action(BuyerAction::Counter, Some(counter));
        }

        if is_urgent && budget * 1.1 >= price as f64 {
            let counter = (budget * 0.98) as i64;
            return BuyerReply::new(format!(
                "I understand the urgency. My best offer is ₹{}.",
                counter
            ))
            .with_action(BuyerAction::Counter, Some(counter));
        }

        let counter = ((budget + (price as f64).min(budget * 1.2)) / 2.0) as i64;
        if counter as f64 >= budget * 1.1 {
            BuyerReply::new("This exceeds my budget constraints. Thank you for your time.")
                .with_action(BuyerAction::Reject, None)
        } else {
            BuyerReply::new(format!(
                "My maximum is ₹{}. Could we settle at ₹{}?",
                self.budget, counter
            ))
            .with_action(BuyerAction::Counter, Some(counter))
        }
    }
}

/// Extract the first price-like token, tolerating currency prefixes and
/// comma grouping
fn parse_price(message: &str) -> Option<i64> {
    PRICE_PATTERN
        .captures(message)
        .and_then(|captures| captures.get(1))
        .and_then(|group| group.as_str().replace(',', "").parse().ok())
}

fn counter_message(offer: i64) -> String {
    let template = COUNTER_TEMPLATES
        .choose(&mut rand::thread_rng())
        .expect("non-empty template list");
    template.replace("{offer}", &offer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price("i'll take 95"), Some(95));
        assert_eq!(parse_price("₹1,500 or nothing"), Some(1500));
        assert_eq!(parse_price("rs 450 works"), Some(450));
        assert_eq!(parse_price("no numbers here"), None);
    }

    #[test]
    fn test_accepts_well_under_budget() {
        let mut agent = BuyerAgent::new("Widget", 100);
        let reply = agent.respond("I'll take 80");

        assert_eq!(reply.action, Some(BuyerAction::Accept));
        assert_eq!(reply.offer_price, Some(80));
    }

    #[test]
    fn test_counters_within_budget_early() {
        let mut agent = BuyerAgent::new("Widget", 100);
        let reply = agent.respond("I'll take 95");

        assert_eq!(reply.action, Some(BuyerAction::Counter));
        // max(95 * 93%, 100 * 95%) = 95
        assert_eq!(reply.offer_price, Some(95));
    }

    #[test]
    fn test_accepts_final_offer_within_budget() {
        let mut agent = BuyerAgent::new("Widget", 100);
        let reply = agent.respond("Final offer: 95");

        assert_eq!(reply.action, Some(BuyerAction::Accept));
        assert_eq!(reply.offer_price, Some(95));
    }

    #[test]
    fn test_accepts_within_budget_after_three_rounds() {
        let mut agent = BuyerAgent::new("Widget", 100);

        let first = agent.respond("How about 95?");
        assert_eq!(first.action, Some(BuyerAction::Counter));

        let second = agent.respond("Still want 95");
        assert_eq!(second.action, Some(BuyerAction::Counter));

        let third = agent.respond("95, take it or leave it... how about 95");
        assert_eq!(third.action, Some(BuyerAction::Accept));
        assert_eq!(third.offer_price, Some(95));
    }

    #[test]
    fn test_counters_slightly_over_budget() {
        let mut agent = BuyerAgent::new("Widget", 100);
        let reply = agent.respond("I want 115");

        assert_eq!(reply.action, Some(BuyerAction::Counter));
        // (100 + min(115, 120)) / 2 = 107
        assert_eq!(reply.offer_price, Some(107));
    }

    #[test]
    fn test_flexes_for_urgent_deals_near_budget() {
        let mut agent = BuyerAgent::new("Widget", 100);
        let reply = agent.respond("Need to close soon, 105");

        assert_eq!(reply.action, Some(BuyerAction::Counter));
        assert_eq!(reply.offer_price, Some(98));
    }

    #[test]
    fn test_counters_far_over_budget_at_capped_midpoint() {
        let mut agent = BuyerAgent::new("Widget", 100);
        let reply = agent.respond("The price is 150");

        assert_eq!(reply.action, Some(BuyerAction::Counter));
        // (100 + min(150, 120)) / 2 = 110
        assert_eq!(reply.offer_price, Some(110));
        assert!(reply.message.starts_with("My maximum is ₹100"));
    }

    #[test]
    fn test_asks_when_no_price_given() {
        let mut agent = BuyerAgent::new("Widget", 100);
        let reply = agent.respond("Hello, interested in my widget?");

        assert_eq!(reply.action, Some(BuyerAction::Ask));
        assert_eq!(reply.offer_price, None);
    }

    #[test]
    fn test_rejects_final_offer_without_price() {
        let mut agent = BuyerAgent::new("Widget", 100);
        let reply = agent.respond("This is final, no numbers for you");

        assert_eq!(reply.action, Some(BuyerAction::Reject));
    }

    #[test]
    fn test_transcript_records_both_sides() {
        let mut agent = BuyerAgent::new("Widget", 100);
        agent.respond("I'll take 80");

        assert_eq!(agent.rounds(), 1);
        assert_eq!(agent.transcript().len(), 2);
        assert!(agent.transcript()[0].starts_with("Seller (Round 1):"));
        assert!(agent.transcript()[1].starts_with("Buyer:"));
    }
}
