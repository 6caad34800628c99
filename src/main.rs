mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::{Config, StorageBackend};
use db::{MatchStore, MemoryStore, PgStore, PlayerStore};
use services::{MatchService, PlayerService};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub players: PlayerService,
    pub matches: MatchService,
}

impl AppState {
    pub fn new(
        config: Config,
        player_store: Arc<dyn PlayerStore>,
        match_store: Arc<dyn MatchStore>,
    ) -> Self {
        let players = PlayerService::new(player_store);
        let matches = MatchService::new(match_store, players.clone());

        Self {
            config,
            players,
            matches,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cots_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Command of the Sea backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded (storage: {:?})", config.storage);

    let (player_store, match_store): (Arc<dyn PlayerStore>, Arc<dyn MatchStore>) =
        match config.storage {
            StorageBackend::Postgres => {
                let database = config
                    .database
                    .as_ref()
                    .context("Database configuration missing for postgres storage")?;

                let db = db::create_pool(&database.url, database.max_connections).await?;
                tracing::info!("Connected to database");

                sqlx::migrate!("./migrations").run(&db).await?;
                tracing::info!("Database migrations completed");

                let store = Arc::new(PgStore::new(db));
                (
                    store.clone() as Arc<dyn PlayerStore>,
                    store as Arc<dyn MatchStore>,
                )
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; records are lost on shutdown");
                let store = Arc::new(MemoryStore::new());
                (
                    store.clone() as Arc<dyn PlayerStore>,
                    store as Arc<dyn MatchStore>,
                )
            }
        };

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), player_store, match_store));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = routes::create_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
