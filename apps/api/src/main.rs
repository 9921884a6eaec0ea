mod config;
mod errors;
mod routes;
mod scholarships;
mod state;

use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::scholarships::loader::load_or_empty;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scholarship API v{}", env!("CARGO_PKG_VERSION"));

    // Load once; an unreadable file leaves the service up with no data
    info!("Loading scholarships from {:?}", config.dataset_path);
    let dataset = Arc::new(load_or_empty(&config.dataset_path));

    let state = AppState { dataset };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    info!("Listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
