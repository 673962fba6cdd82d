use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::dispatcher::Dispatcher;

pub const WEBHOOK_PATH: &str = "/api";
pub const ACK_BODY: &str = "Update processed";

/// Build the router. Every webhook request is answered with 200 so Telegram
/// never redelivers an update.
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(webhook))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

async fn webhook(State(dispatcher): State<Arc<Dispatcher>>, body: Bytes) -> &'static str {
    let outcome = dispatcher.handle(&body).await;
    if outcome.acknowledged() { ACK_BODY } else { "" }
}

async fn health() -> &'static str {
    "ok"
}
