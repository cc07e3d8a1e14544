//! Web shell: one page plus a small JSON API

pub mod handlers;
pub mod page;
pub mod render;

use crate::service::ArticleService;
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::info;

/// Request bodies are a topic and a model name; larger ones get a 413 from the extractor
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: ArticleService,
}

/// Build the router for the web shell
pub fn create_app(service: ArticleService) -> Router {
    let state = AppState { service };

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/models", get(handlers::models))
        .route("/generate", post(handlers::generate));

    Router::new()
        .route("/", get(handlers::index))
        .nest("/api", api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Serve the web shell until Ctrl-C
pub async fn serve(addr: SocketAddr, service: ArticleService) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_app(service))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("Server error")
}
