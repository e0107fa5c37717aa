//! Service entry-point: logging, configuration, and the HTTP server.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use pantry::inbound::http::state::HttpState;
use pantry::outbound::persistence::InMemoryUserRepository;
use pantry::server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is the normal production case.
    let _ = dotenvy::dotenv();

    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;
    let state = web::Data::new(HttpState::new(Arc::new(InMemoryUserRepository::new())));

    tracing::info!(port = config.port, "starting pantry service");
    create_server(config, state)?.await
}
