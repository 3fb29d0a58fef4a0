//! Application state shared by the app-level handlers.
//!
//! Resource handlers get their repositories at router construction; this
//! state only carries what `/ready` and shutdown need.

use mongodb::Client;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Set once the background connect succeeds, taken on shutdown
    mongo_client: Arc<RwLock<Option<Client>>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            mongo_client: Arc::new(RwLock::new(None)),
        }
    }

    /// A handle to the shared client, if connected
    pub async fn mongo_client(&self) -> Option<Client> {
        self.mongo_client.read().await.clone()
    }

    pub async fn set_mongo_client(&self, client: Client) {
        *self.mongo_client.write().await = Some(client);
    }

    /// Remove the client so no new work can start on it
    pub async fn take_mongo_client(&self) -> Option<Client> {
        self.mongo_client.write().await.take()
    }
}
