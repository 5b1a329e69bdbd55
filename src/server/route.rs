use crate::application::PairingStats;
use crate::server::{websocket_listener, Hub};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    #[serde(flatten)]
    stats: PairingStats,
}

pub fn create_router(hub: Hub) -> Router {
    Router::new()
        .route("/ws", get(websocket_listener::handle_websocket))
        .route("/health", get(health))
        .with_state(hub)
}

async fn health(State(hub): State<Hub>) -> impl IntoResponse {
    Json(HealthReport {
        status: "ok",
        stats: hub.stats(),
    })
}
