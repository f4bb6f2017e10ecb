use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use brickyard_lib::ai::{BlockGenerator, GenerationClient};
use brickyard_lib::persistence::{FileWorkStore, MemoryWorkStore, WorkStore};
use brickyard_lib::state::Settings;
use tower_http::cors::CorsLayer;

mod routes;

#[derive(Clone)]
pub struct AppState {
    /// None when no inference credential is configured
    pub generator: Option<Arc<dyn BlockGenerator>>,
    pub store: Arc<dyn WorkStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/generate", post(routes::generate))
        .route("/api/works", get(routes::list_works).post(routes::create_work))
        .route("/api/works/public", get(routes::list_public))
        .route(
            "/api/works/{id}",
            patch(routes::update_work).delete(routes::delete_work),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brickyard_server=info,brickyard_lib=info".into()),
        )
        .init();

    let settings = Settings::load();

    let client = GenerationClient::new(settings.generation.clone());
    let generator: Option<Arc<dyn BlockGenerator>> = if client.is_configured() {
        Some(Arc::new(client))
    } else {
        tracing::warn!("No inference credential, /api/generate will answer 503");
        None
    };

    let store: Arc<dyn WorkStore> = match settings.works_dir() {
        Some(dir) => {
            tracing::info!("Storing works in {}", dir.display());
            Arc::new(FileWorkStore::new(dir))
        }
        None => {
            tracing::warn!("No data directory available, works are kept in memory");
            Arc::new(MemoryWorkStore::new())
        }
    };

    let bind = settings.server.bind.clone();
    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {bind}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Server running on http://{bind}");

    if let Err(e) = axum::serve(listener, app(AppState { generator, store })).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}
