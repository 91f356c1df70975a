mod auth;
mod config;
mod db;
mod errors;
mod interview;
mod models;
mod providers;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::interview::difficulty::KeywordPolicy;
use crate::interview::session::InMemorySessionStore;
use crate::interview::InterviewService;
use crate::providers::ContentChain;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgInterviewStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgInterviewStore::new(db));

    // Initialize provider chain (local, then cloud, then static)
    let chain = ContentChain::from_config(&config)?;
    info!("Provider chain: {:?} -> static", chain.tier_names());

    let interviews = InterviewService::new(
        chain,
        Arc::new(KeywordPolicy::default()),
        Arc::new(InMemorySessionStore::new()),
        store.clone(),
    );

    // Build app state
    let state = AppState {
        store,
        interviews: Arc::new(interviews),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
