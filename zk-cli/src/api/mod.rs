// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP front end

mod handlers;
mod response;

pub use handlers::USER_HEADER;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use zk_core::{CardService, ZkError, ZkResult};

/// Bundled front-end markup
pub const DEFAULT_TEMPLATE: &str = include_str!("../../assets/index.html");

const BODY_LIMIT: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CardService>,
    pub template: Arc<String>,
    pub default_user: String,
    pub body_limit: usize,
}

impl AppState {
    pub fn new(service: Arc<CardService>, template: String, default_user: impl Into<String>) -> Self {
        Self {
            service,
            template: Arc::new(template),
            default_user: default_user.into(),
            body_limit: BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // Cards
        .route("/api/pdf", post(handlers::generate_pdf))
        .route("/api/html", post(handlers::save_html))
        .route("/api/card-id", get(handlers::card_id))
        // Files
        .route("/api/files", get(handlers::list_files))
        .route("/api/files/:id", delete(handlers::delete_file))
        .route("/files/:id", get(handlers::view_file))
        .route("/files/:id/download", get(handlers::download_file))
        // Settings
        .route(
            "/api/settings",
            get(handlers::get_settings)
                .put(handlers::save_settings)
                .delete(handlers::reset_settings),
        )
        // Data
        .route("/api/export", post(handlers::export_data))
        .route("/api/import/:id", get(handlers::import_data))
        .route("/api/stats", get(handlers::usage_stats))
        .route("/api/maintenance/clean", post(handlers::clean_old_files))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, bind: &str) -> ZkResult<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| ZkError::Config(format!("cannot bind {}: {}", bind, e)))?;
    tracing::info!("listening on http://{}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
