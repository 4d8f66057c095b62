//! haggle CLI binary

use clap::Parser;
use haggle::cli::{run_single_round, Cli, Commands, HaggleApp};
use haggle::error::Result;
use haggle::transport::{HttpTransport, LocalTransport, NegotiationTransport};
use haggle::types::NegotiationParams;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize logging; chat output goes to stdout, so keep the default
    // level quiet
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            endpoint,
            product,
            budget,
            local,
        } => {
            let params = NegotiationParams::new(product, budget);
            params.validate()?;

            let app = HaggleApp::new(build_transport(&endpoint, local)?, params);
            app.run_chat().await?;
        }

        Commands::Round {
            endpoint,
            product,
            budget,
            message,
            local,
        } => {
            let params = NegotiationParams::new(product, budget);
            run_single_round(build_transport(&endpoint, local)?, &params, &message).await?;
        }
    }

    Ok(())
}

fn build_transport(endpoint: &str, local: bool) -> Result<Arc<dyn NegotiationTransport>> {
    if local {
        tracing::debug!("Using the built-in buyer agent");
        Ok(Arc::new(LocalTransport::new()))
    } else {
        Ok(Arc::new(HttpTransport::new(endpoint)?))
    }
}
