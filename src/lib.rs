//! Mocksmith
//!
//! A standalone mock HTTP server. Register synthetic responses keyed by
//! path and method, then point your client at it - matching requests are
//! answered with the configured status, headers, delay, and body, no real
//! backend required.
//!
//! # Features
//!
//! - **Dynamic registration**: CRUD over mock endpoints via a management
//!   REST API, no restarts
//! - **Synthetic bodies**: generate plausible fake JSON from a simplified
//!   schema, an OpenAPI operation, or an example template
//! - **Placeholders**: `{{name.fullName}}`-style tokens resolved to fake
//!   values inside example templates
//! - **Latency simulation**: per-endpoint response delays
//! - **Expiry**: endpoints can carry a TTL and vanish from listings
//!
//! # Example
//!
//! ```bash
//! curl -X POST localhost:4000/api/mocks \
//!   -H 'content-type: application/json' \
//!   -d '{"path": "/users", "method": "GET", "responseBody": {"users": []}}'
//!
//! curl localhost:4000/users
//! ```

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod model;
pub mod openapi;
pub mod provider;
pub mod store;

pub use config::EngineConfig;
pub use error::Error;
pub use generator::Generator;
pub use model::{MockEndpoint, MockSchema, SchemaType};
pub use store::{MemoryStore, MockStore};

use crate::api::ApiState;
use crate::dispatch::DispatchState;
use axum::Router;
use std::sync::Arc;
use tracing::info;

/// Build the complete application router.
///
/// The management API is mounted under the configured prefix, and the
/// mock dispatcher is layered in front of everything else: requests
/// outside the prefix are resolved against the registry before any
/// routing happens.
pub fn app(store: Arc<dyn MockStore>, config: &EngineConfig) -> Router {
    let api_state = ApiState {
        store: store.clone(),
        generator: Generator::new(),
        validate_schemas: config.validate_schemas,
    };
    let dispatch_state = DispatchState::new(store, &config.management_prefix);

    Router::new()
        .nest(&config.management_prefix, api::router(api_state))
        .layer(axum::middleware::from_fn_with_state(
            dispatch_state,
            dispatch::mock_dispatch,
        ))
}

/// Load seed definitions from the configuration into the store.
pub async fn seed_store(store: &dyn MockStore, config: &EngineConfig) {
    for schema in &config.seed.schemas {
        store.create_schema(schema.clone()).await;
    }
    for endpoint in &config.seed.endpoints {
        store.create_endpoint(endpoint.clone()).await;
    }
    if !config.seed.endpoints.is_empty() || !config.seed.schemas.is_empty() {
        info!(
            endpoints = config.seed.endpoints.len(),
            schemas = config.seed.schemas.len(),
            "seeded registry from configuration"
        );
    }
}
