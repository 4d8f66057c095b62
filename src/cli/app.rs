//! Interactive driver wiring a SessionController to stdin/stdout

use crate::error::Result;
use crate::session::{RoundEvent, SessionController};
use crate::transport::NegotiationTransport;
use crate::types::{NegotiationParams, SellerOffer};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Interactive negotiation console for the seller side
pub struct HaggleApp {
    controller: SessionController,
    params: NegotiationParams,
}

impl HaggleApp {
    /// Create the app and spawn its event renderer
    pub fn new(transport: Arc<dyn NegotiationTransport>, params: NegotiationParams) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        tokio::spawn(render_events(event_rx));

        Self {
            controller: SessionController::with_event_sink(transport, event_tx),
            params,
        }
    }

    /// Run the chat loop until EOF or /quit
    pub async fn run_chat(&self) -> Result<()> {
        println!(
            "Negotiating the sale of {} against a buyer budget of ₹{}.",
            self.params.product, self.params.budget
        );
        println!("Type your offer and press Enter. Commands: /history, /reset, /quit");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        prompt();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            match line {
                "" => {}
                "/quit" | "/q" => break,
                "/reset" => {
                    if let Err(e) = self.controller.reset_session().await {
                        println!("Error: {}", e);
                    }
                }
                "/history" => self.print_history().await,
                _ => {
                    if let Err(e) = self
                        .controller
                        .submit_offer(&self.params, &SellerOffer::new(line))
                        .await
                    {
                        // Transport failures are already rendered as a
                        // failed-round event
                        if !e.is_transport() {
                            println!("Error: {}", e);
                        }
                    }
                }
            }
            prompt();
        }

        Ok(())
    }

    async fn print_history(&self) {
        let history = self.controller.history().await;
        if history.is_empty() {
            println!("No rounds yet.");
            return;
        }

        if let Some(id) = self.controller.session_id().await {
            println!("Session {}:", id);
        }
        for entry in &history {
            println!("  {}. Seller: {}", entry.round, entry.seller_offer.message);
            println!("     Buyer:  {}", entry.buyer_reply.message);
        }
    }
}

/// Submit one offer, print the reply as JSON, then discard the session
pub async fn run_single_round(
    transport: Arc<dyn NegotiationTransport>,
    params: &NegotiationParams,
    message: &str,
) -> Result<()> {
    let controller = SessionController::new(transport);

    let reply = controller
        .submit_offer(params, &SellerOffer::new(message))
        .await?;
    println!("{}", serde_json::to_string_pretty(&reply)?);

    controller.reset_session().await
}

fn prompt() {
    print!("seller> ");
    let _ = std::io::stdout().flush();
}

async fn render_events(mut events: mpsc::UnboundedReceiver<RoundEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            RoundEvent::Started { .. } => {
                println!("🤔 Buyer is considering your offer...");
            }
            RoundEvent::Resolved { reply, .. } => match (reply.action, reply.offer_price) {
                (Some(action), Some(price)) => {
                    println!("Buyer [{} ₹{}]: {}", action, price, reply.message)
                }
                (Some(action), None) => println!("Buyer [{}]: {}", action, reply.message),
                _ => println!("Buyer: {}", reply.message),
            },
            RoundEvent::Failed { reason, .. } => {
                println!("Error: {}", reason);
            }
            RoundEvent::SessionReset => {
                println!("New negotiation started.");
            }
        }
    }
}
