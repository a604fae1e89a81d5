mod config;
mod errors;
mod generation;
mod layout;
mod models;
mod render;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
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

    info!("Starting Drillsheet API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Generator bounds: denominator ≤ {}, numerator ≤ {}, whole ≤ {}",
        config.generator_bounds.max_denominator,
        config.generator_bounds.max_numerator,
        config.generator_bounds.max_whole
    );

    // Export page config: 28-unit serif text in a two-column grid
    let page_config = default_page_config();
    info!(
        "Layout page config: {} columns × {} at font size {}",
        page_config.columns, page_config.column_width, page_config.font_size
    );

    let state = AppState::new(config.clone(), page_config);
    info!(
        "Worksheet store initialized (capacity {})",
        config.worksheet_store_capacity
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // browser UI is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
