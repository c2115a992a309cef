//! Mock registry: process-lifetime storage of endpoints and schemas.

use crate::model::{MockEndpoint, MockSchema};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Storage and lookup of mock endpoints and schemas.
///
/// Implementations own their synchronization: every operation is
/// individually atomic and safe to call from concurrent tasks. Misses are
/// reported as `None`/`false`, never as errors.
#[async_trait]
pub trait MockStore: Send + Sync {
    /// Case-insensitive exact match on path and method; first stored
    /// match wins. Expired endpoints still match here - expiry is
    /// enforced only by `list_endpoints`.
    async fn find_endpoint(&self, path: &str, method: &str) -> Option<MockEndpoint>;

    async fn endpoint(&self, id: Uuid) -> Option<MockEndpoint>;

    /// Evicts expired endpoints, then returns the survivors.
    async fn list_endpoints(&self) -> Vec<MockEndpoint>;

    /// Stores the endpoint, assigning a fresh id when nil and stamping
    /// `created_at`.
    async fn create_endpoint(&self, endpoint: MockEndpoint) -> MockEndpoint;

    /// Full replace; `None` when `id` is absent (never creates).
    async fn update_endpoint(&self, id: Uuid, endpoint: MockEndpoint) -> Option<MockEndpoint>;

    /// Returns true iff something was removed.
    async fn delete_endpoint(&self, id: Uuid) -> bool;

    async fn schema(&self, id: &str) -> Option<MockSchema>;

    async fn list_schemas(&self) -> Vec<MockSchema>;

    /// Stores the schema, generating an id only when the caller supplied
    /// none, and stamping `created_at`.
    async fn create_schema(&self, schema: MockSchema) -> MockSchema;

    /// Full replace; stamps `updated_at`; `None` when `id` is absent.
    async fn update_schema(&self, id: &str, schema: MockSchema) -> Option<MockSchema>;

    async fn delete_schema(&self, id: &str) -> bool;
}

/// In-memory `MockStore` behind per-collection read-write locks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    endpoints: RwLock<HashMap<Uuid, MockEndpoint>>,
    schemas: RwLock<HashMap<String, MockSchema>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MockStore for MemoryStore {
    async fn find_endpoint(&self, path: &str, method: &str) -> Option<MockEndpoint> {
        let endpoints = self.endpoints.read().await;
        endpoints
            .values()
            .find(|e| {
                e.path.eq_ignore_ascii_case(path) && e.method.eq_ignore_ascii_case(method)
            })
            .cloned()
    }

    async fn endpoint(&self, id: Uuid) -> Option<MockEndpoint> {
        self.endpoints.read().await.get(&id).cloned()
    }

    async fn list_endpoints(&self) -> Vec<MockEndpoint> {
        let mut endpoints = self.endpoints.write().await;
        let now = Utc::now();
        let before = endpoints.len();
        endpoints.retain(|_, e| !e.is_expired(now));
        let evicted = before - endpoints.len();
        if evicted > 0 {
            debug!(evicted, "evicted expired mock endpoints");
        }
        endpoints.values().cloned().collect()
    }

    async fn create_endpoint(&self, mut endpoint: MockEndpoint) -> MockEndpoint {
        let mut endpoints = self.endpoints.write().await;
        if endpoint.id.is_nil() {
            endpoint.id = Uuid::new_v4();
        }
        endpoint.created_at = Utc::now();
        endpoints.insert(endpoint.id, endpoint.clone());
        endpoint
    }

    async fn update_endpoint(&self, id: Uuid, mut endpoint: MockEndpoint) -> Option<MockEndpoint> {
        let mut endpoints = self.endpoints.write().await;
        if !endpoints.contains_key(&id) {
            return None;
        }
        endpoint.id = id;
        endpoints.insert(id, endpoint.clone());
        Some(endpoint)
    }

    async fn delete_endpoint(&self, id: Uuid) -> bool {
        self.endpoints.write().await.remove(&id).is_some()
    }

    async fn schema(&self, id: &str) -> Option<MockSchema> {
        self.schemas.read().await.get(id).cloned()
    }

    async fn list_schemas(&self) -> Vec<MockSchema> {
        self.schemas.read().await.values().cloned().collect()
    }

    async fn create_schema(&self, mut schema: MockSchema) -> MockSchema {
        let mut schemas = self.schemas.write().await;
        if schema.id.is_empty() {
            schema.id = Uuid::new_v4().to_string();
        }
        schema.created_at = Utc::now();
        schemas.insert(schema.id.clone(), schema.clone());
        schema
    }

    async fn update_schema(&self, id: &str, mut schema: MockSchema) -> Option<MockSchema> {
        let mut schemas = self.schemas.write().await;
        if !schemas.contains_key(id) {
            return None;
        }
        schema.id = id.to_string();
        schema.updated_at = Some(Utc::now());
        schemas.insert(id.to_string(), schema.clone());
        Some(schema)
    }

    async fn delete_schema(&self, id: &str) -> bool {
        self.schemas.write().await.remove(id).is_some()
    }
}
