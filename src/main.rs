use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::prelude::*;

use flanrelay::server::{self, WEBHOOK_PATH};
use flanrelay::{Config, Dispatcher, InferenceClient, TelegramClient};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .init();

    let listen_addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

    let config = Config::from_env()?;
    info!("🚀 Starting flanrelay...");
    if config.hf_api_token.is_none() {
        tracing::warn!("HF_API_TOKEN is not set, every prompt will get the apology reply");
    }

    let telegram = TelegramClient::connect(&config.telegram_token).await?;
    let inference = InferenceClient::new(config.hf_api_token.clone())?;
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(telegram), Arc::new(inference)));

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Listening on {listen_addr} (webhook at {WEBHOOK_PATH})");

    axum::serve(listener, server::router(dispatcher))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
