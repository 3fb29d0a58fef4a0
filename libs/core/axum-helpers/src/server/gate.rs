//! Serve 503 for resource routes until the document store is ready.

use crate::errors::{AppError, ErrorCode};
use axum::{
    Router,
    extract::{Request, State},
    http::Extensions,
    response::{IntoResponse, Response},
    routing::any,
};
use std::sync::{Arc, OnceLock};
use tower::ServiceExt;
use tracing::info;

/// Holds the resource router once the store is connected.
///
/// Paths registered through [`StoreGate::routes`] answer 503
/// `SERVICE_UNAVAILABLE` while the gate is closed and are dispatched to the
/// opened router afterwards. The gate opens at most once.
#[derive(Clone, Default)]
pub struct StoreGate {
    inner: Arc<OnceLock<Router>>,
}

impl StoreGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dispatching to `router`. Returns `false` if already open.
    pub fn open(&self, router: Router) -> bool {
        let opened = self.inner.set(router).is_ok();
        if opened {
            info!("Store ready, resource routes enabled");
        }
        opened
    }

    pub fn is_open(&self) -> bool {
        self.inner.get().is_some()
    }

    /// A router matching `paths` (any method) that forwards through the gate.
    pub fn routes<I>(&self, paths: I) -> Router
    where
        I: IntoIterator<Item = &'static str>,
    {
        paths
            .into_iter()
            .fold(Router::new(), |router, path| {
                router.route(path, any(dispatch))
            })
            .with_state(self.clone())
    }
}

async fn dispatch(State(gate): State<StoreGate>, request: Request) -> Response {
    match gate.inner.get() {
        Some(router) => {
            // Drop the outer match's path params; the resource router matches again
            let (mut parts, body) = request.into_parts();
            parts.extensions = Extensions::new();

            router
                .clone()
                .oneshot(Request::from_parts(parts, body))
                .await
                .unwrap_or_else(|never| match never {})
        }
        None => AppError::ServiceUnavailable(
            ErrorCode::ServiceUnavailable.default_message().to_string(),
        )
        .into_response(),
    }
}
