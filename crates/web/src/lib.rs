//! HTTP surface: dashboard page plus the JSON habit/log API.

#![forbid(unsafe_code)]

mod api;
mod dashboard;
mod error;

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use services::AppServices;

pub use error::ApiError;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: AppServices,
}

/// Build the full route table over the given state.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::root))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/api/habit-log", post(api::save_habit_log))
        .route("/api/habit", post(api::create_habit))
        .route(
            "/api/habit/{id}",
            put(api::rename_habit).delete(api::delete_habit),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the address and serve until the process is stopped.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot be bound or the server
/// fails while running.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, router(state)).await
}
