// SPDX-License-Identifier: MIT

//! Reelroom web server.
//!
//! Session-based login, registration and profile editing over a hosted
//! backend service, plus the placeholder room and match actions.

use reelroom::{
    config::{Backend, Config},
    services::SupabaseClient,
    store::{MemoryAuth, MemoryProfileStore, SupabaseAuth, SupabaseProfileStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, backend = ?config.backend, "Starting Reelroom");

    let state = Arc::new(build_state(config.clone()));

    // Build router
    let app = reelroom::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Wire the configured backend into shared state.
fn build_state(config: Config) -> AppState {
    match config.backend {
        Backend::Memory => {
            tracing::warn!("Using the in-memory backend; all data is lost on restart");
            AppState {
                auth: Arc::new(MemoryAuth::new()),
                profiles: Arc::new(MemoryProfileStore::new()),
                config,
            }
        }
        Backend::Supabase => {
            if config.supabase_service_role_key.is_none() {
                tracing::info!(
                    "No service-role key configured; profile rows are created on first save"
                );
            }
            let client = SupabaseClient::new(
                config.supabase_url.clone(),
                config.supabase_anon_key.clone(),
                config.supabase_service_role_key.clone(),
            );
            AppState {
                auth: Arc::new(SupabaseAuth::new(client.clone())),
                profiles: Arc::new(SupabaseProfileStore::new(client)),
                config,
            }
        }
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reelroom=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
