mod config;
mod game;
mod models;
mod routes;
mod utils;
mod websocket;

use std::{sync::Arc, time::Instant};

use anyhow::Result;
use axum::{routing::get, Router};
use config::Config;
use dashmap::DashMap;
use models::PuzzleParams;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Bookkeeping for an open WebSocket connection
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub connected_at: Instant,
    /// Last accepted params, `None` until the client sets or refreshes a puzzle
    pub params: Option<PuzzleParams>,
}

impl SessionInfo {
    pub fn new() -> Self {
        Self {
            connected_at: Instant::now(),
            params: None,
        }
    }
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    /// Open WebSocket connections keyed by connection id
    pub sessions: DashMap<Uuid, SessionInfo>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_search_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word search server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        "Configuration loaded (default puzzle {}x{}, {} words)",
        config.puzzle.default_height,
        config.puzzle.default_width,
        config.puzzle.default_words.len()
    );

    let addr = config.server_addr();
    let state = Arc::new(AppState::new(config));
    let app = create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Puzzle API: http://{}/api/puzzle", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router: WebSocket, API routes and static front-end files
pub fn create_app(state: Arc<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let frontend_service = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/ws", get(websocket::handle_websocket))
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub fn test_state() -> Arc<AppState> {
    use config::{PuzzleConfig, ServerConfig};

    Arc::new(AppState::new(Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            static_dir: "./static".to_string(),
        },
        puzzle: PuzzleConfig::default(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_info_has_no_params() {
        let info = SessionInfo::new();
        assert!(info.params.is_none());
    }

    #[test]
    fn test_session_registry() {
        let state = test_state();
        let id = Uuid::new_v4();
        state.sessions.insert(id, SessionInfo::new());
        assert_eq!(state.sessions.len(), 1);

        if let Some(mut info) = state.sessions.get_mut(&id) {
            info.params = Some(state.config.puzzle.default_params());
        }
        assert_eq!(
            state.sessions.get(&id).and_then(|info| info.params.clone()),
            Some(state.config.puzzle.default_params())
        );

        state.sessions.remove(&id);
        assert!(state.sessions.is_empty());
    }
}
