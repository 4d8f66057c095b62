//! CLI command definitions

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "haggle")]
#[command(about = "haggle - Seller-side client for negotiating with a buyer agent", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive negotiation session
    Chat {
        /// Negotiation endpoint base URL
        #[arg(short, long, default_value = "http://127.0.0.1:8000/api")]
        endpoint: String,

        /// Product being sold
        #[arg(short, long)]
        product: String,

        /// The buyer's stated budget
        #[arg(short, long)]
        budget: i64,

        /// Negotiate against the built-in buyer agent instead of a remote endpoint
        #[arg(short, long)]
        local: bool,
    },

    /// Submit a single offer, print the buyer's reply as JSON, and reset
    Round {
        /// Negotiation endpoint base URL
        #[arg(short, long, default_value = "http://127.0.0.1:8000/api")]
        endpoint: String,

        /// Product being sold
        #[arg(short, long)]
        product: String,

        /// The buyer's stated budget
        #[arg(short, long)]
        budget: i64,

        /// Seller message to submit
        #[arg(short, long)]
        message: String,

        /// Negotiate against the built-in buyer agent instead of a remote endpoint
        #[arg(short, long)]
        local: bool,
    },
}
