//! HTTP surface: routes, shared state and the serve loop.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::checker::dictionary::Dictionary;
use crate::wikipedia::WikipediaClient;
use crate::{Config, SpellChecker};

/// Everything a handler can read. Built once at startup, never mutated.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<SpellChecker>,
    pub words: Arc<Dictionary>,
    pub wikipedia: Arc<WikipediaClient>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let checker = SpellChecker::new(config);
        let words = Dictionary::load_or_empty(&config.dictionary);
        let wikipedia =
            WikipediaClient::new(&config.wikipedia).context("Failed to create Wikipedia client")?;

        Ok(Self {
            checker: Arc::new(checker),
            words: Arc::new(words),
            wikipedia: Arc::new(wikipedia),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/corriger", post(handlers::corriger))
        .route("/dictionary/check", get(handlers::check_word))
        .route("/dictionary/suggestions", get(handlers::suggest_word))
        .route("/lemmatize", get(handlers::lemmatize))
        .route("/wikipedia/search", get(handlers::wikipedia_search))
        .route("/wikipedia/translate", get(handlers::wikipedia_translate));

    Router::new()
        .route("/", get(handlers::health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// Bind `config.bind_addr` and serve until Ctrl-C
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
