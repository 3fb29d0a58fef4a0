use axum_helpers::{StoreGate, create_production_app, create_router, health_router};
use core_config::load_dotenv;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;
mod store;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    load_dotenv();
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let state = AppState::new(config);
    let gate = StoreGate::new();

    // Serve immediately; resource routes answer 503 until the store is ready
    let connect_task = tokio::spawn({
        let state = state.clone();
        let gate = gate.clone();
        async move {
            if let Err(e) = store::connect_and_provision(state, gate).await {
                error!(error = %e, "MongoDB connection failed");
            }
        }
    });

    let api_routes = api::routes(&state, &gate);
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.cors)?;
    let app = router.merge(health_router(state.config.app));

    info!("Starting Catalog API with graceful shutdown (30s timeout)");

    let server = state.config.server.clone();
    create_production_app(app, &server, Duration::from_secs(30), async move {
        connect_task.abort();
        if let Some(client) = state.take_mongo_client().await {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed successfully");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
