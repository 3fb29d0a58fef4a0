//! Background connection to MongoDB.
//!
//! The listener is already serving when this runs; resource routes answer
//! 503 until [`connect_and_provision`] opens the gate.

use axum::Router;
use axum_helpers::StoreGate;
use database::{
    RetryConfig, retry_with_backoff,
    mongodb::{Database, connect_from_config_with_retry, ensure_collection},
};
use domain_carts::MongoCartRepository;
use domain_products::MongoProductRepository;
use domain_users::MongoUserRepository;
use std::future::Future;
use tracing::{error, info};

use crate::{api, state::AppState};

/// Provisioned at startup; no routes read or write it
pub const MESSAGES_COLLECTION: &str = "messages";

/// Cap on the delay between connection attempts
const MAX_RETRY_DELAY_MS: u64 = 30_000;

fn store_retry() -> RetryConfig {
    RetryConfig::new()
        .unlimited()
        .with_max_delay(MAX_RETRY_DELAY_MS)
}

/// Connect (retrying until it succeeds), provision, then open `gate`.
///
/// The unique indexes on users and cart items are required: the gate stays
/// closed until both exist. Other provisioning failures are only logged.
pub async fn connect_and_provision(state: AppState, gate: StoreGate) -> eyre::Result<()> {
    let config = &state.config.mongodb;
    info!(url = %config.redacted_url(), "Connecting to MongoDB");

    let client = connect_from_config_with_retry(config, Some(store_retry())).await?;
    let db = client.database(config.database());

    info!(database = config.database(), "Successfully connected to MongoDB");

    provision(&db).await;

    let users = &MongoUserRepository::new(&db);
    let carts = &MongoCartRepository::new(&db);
    open_when_ready(&gate, api::resource_routes(&db), store_retry(), move || async move {
        users.init_indexes().await?;
        carts.init_indexes().await?;
        Ok::<(), eyre::Report>(())
    })
    .await?;

    state.set_mongo_client(client).await;
    Ok(())
}

/// Open `gate` with `routes` once `required` succeeds, retrying it per `retry`.
///
/// The gate stays closed when `required` never succeeds.
pub async fn open_when_ready<F, Fut, E>(
    gate: &StoreGate,
    routes: Router,
    retry: RetryConfig,
    required: F,
) -> Result<bool, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(required, retry).await?;
    Ok(gate.open(routes))
}

async fn provision(db: &Database) {
    if let Err(e) = ensure_collection(db, MESSAGES_COLLECTION).await {
        error!(collection = MESSAGES_COLLECTION, error = %e, "Failed to provision collection");
    }

    if let Err(e) = MongoProductRepository::new(db).init_indexes().await {
        error!(error = %e, "Failed to create product indexes");
    }
}
