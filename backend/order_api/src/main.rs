//! Pizza order API — entry point.
//!
//! Builds the menu catalog once, then serves it together with an in-memory
//! order table over a small Axum REST API.

mod api;
mod config;
mod errors;
mod requests;

use std::sync::Arc;

use pizza_menu::Catalog;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use errors::ApiError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    // A catalog with dangling references never gets to serve a request.
    let catalog = Catalog::standard().map_err(ApiError::from)?;

    let api_state = Arc::new(api::ApiState::new(catalog));

    let app = api::router(api_state);

    let addr = config.bind_addr();
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
