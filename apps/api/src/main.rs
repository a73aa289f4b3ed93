mod applications;
mod config;
mod dashboard;
mod db;
mod enums;
mod errors;
mod models;
mod query;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::applications::store::PgApplicationStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::LocalFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobTrack API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and run migrations
    let pool = create_pool(&config.database_url).await?;
    let store = Arc::new(PgApplicationStore::new(pool));

    // Initialize local file storage
    let files = Arc::new(LocalFileStore::new(&config.upload_dir));
    info!("File store rooted at {}", config.upload_dir);

    // Build app state
    let state = AppState {
        store,
        files,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
