//! Dynamic request dispatch.
//!
//! Sits in front of all other routing as an axum middleware layer. Every
//! request outside the management prefix is looked up in the registry and,
//! on a hit, answered with the configured status, headers, delay, and
//! body. Everything else passes through to downstream handling - "no mock"
//! is normal control flow, not an error.

use crate::model::MockEndpoint;
use crate::store::MockStore;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Shared state for the dispatch middleware.
#[derive(Clone)]
pub struct DispatchState {
    pub store: Arc<dyn MockStore>,
    /// Path prefix reserved for the management API, lower-cased.
    pub management_prefix: String,
}

impl DispatchState {
    pub fn new(store: Arc<dyn MockStore>, management_prefix: &str) -> Self {
        Self {
            store,
            management_prefix: management_prefix.to_ascii_lowercase(),
        }
    }
}

/// Middleware entry point: serve a registered mock or pass through.
pub async fn mock_dispatch(
    State(state): State<DispatchState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_ascii_lowercase();
    let method = request.method().as_str().to_string();

    if path.is_empty() || is_management(&path, &state.management_prefix) {
        return next.run(request).await;
    }

    info!(%method, %path, "received request");

    let Some(endpoint) = state.store.find_endpoint(&path, &method).await else {
        info!(%method, %path, "no mock found");
        return next.run(request).await;
    };

    info!(
        %method,
        %path,
        status = endpoint.status_code,
        "mock found, replaying response"
    );
    serve(endpoint).await
}

/// Whether the path is addressed to the management API.
fn is_management(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Replay a matched endpoint: headers, status, delay, then body.
async fn serve(endpoint: MockEndpoint) -> Response {
    match replay(endpoint).await {
        Ok(response) => response,
        Err(fault) => {
            // The one case a dispatch fault surfaces to the transport.
            error!(%fault, "failed to assemble mock response");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

async fn replay(endpoint: MockEndpoint) -> Result<Response, String> {
    let mut response = Response::new(Body::empty());

    for (name, value) in &endpoint.headers {
        let name = HeaderName::try_from(name.as_str()).map_err(|e| e.to_string())?;
        let value = HeaderValue::try_from(value.as_str()).map_err(|e| e.to_string())?;
        response.headers_mut().insert(name, value);
    }

    *response.status_mut() = StatusCode::from_u16(endpoint.status_code)
        .map_err(|e| e.to_string())?;

    if endpoint.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(endpoint.delay_ms)).await;
    }

    if let Some(body) = &endpoint.response_body {
        let bytes = serde_json::to_vec_pretty(body).map_err(|e| e.to_string())?;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        *response.body_mut() = Body::from(bytes);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockSchema;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;
    use uuid::Uuid;

    /// Store that records lookups and never matches.
    #[derive(Default)]
    struct SpyStore {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl MockStore for SpyStore {
        async fn find_endpoint(&self, _path: &str, _method: &str) -> Option<MockEndpoint> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            None
        }

        async fn endpoint(&self, _id: Uuid) -> Option<MockEndpoint> {
            None
        }

        async fn list_endpoints(&self) -> Vec<MockEndpoint> {
            Vec::new()
        }

        async fn create_endpoint(&self, endpoint: MockEndpoint) -> MockEndpoint {
            endpoint
        }

        async fn update_endpoint(
            &self,
            _id: Uuid,
            _endpoint: MockEndpoint,
        ) -> Option<MockEndpoint> {
            None
        }

        async fn delete_endpoint(&self, _id: Uuid) -> bool {
            false
        }

        async fn schema(&self, _id: &str) -> Option<MockSchema> {
            None
        }

        async fn list_schemas(&self) -> Vec<MockSchema> {
            Vec::new()
        }

        async fn create_schema(&self, schema: MockSchema) -> MockSchema {
            schema
        }

        async fn update_schema(&self, _id: &str, _schema: MockSchema) -> Option<MockSchema> {
            None
        }

        async fn delete_schema(&self, _id: &str) -> bool {
            false
        }
    }

    fn app(store: Arc<dyn MockStore>) -> Router {
        let state = DispatchState::new(store, "/api");
        Router::new()
            .route("/api/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn_with_state(state, mock_dispatch))
    }

    fn request(method: &str, path: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_management_prefix_detection() {
        assert!(is_management("/api", "/api"));
        assert!(is_management("/api/mocks", "/api"));
        assert!(!is_management("/apiary", "/api"));
        assert!(!is_management("/users", "/api"));
        assert!(!is_management("/", "/api"));
    }

    #[tokio::test]
    async fn test_management_traffic_skips_registry() {
        let spy = Arc::new(SpyStore::default());
        let app = app(spy.clone());

        let response = app.oneshot(request("GET", "/api/ping")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(spy.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unmatched_request_passes_through() {
        let spy = Arc::new(SpyStore::default());
        let app = app(spy.clone());

        let response = app.oneshot(request("GET", "/users")).await.unwrap();
        // Falls through to the router, which has no such route.
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(spy.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_matched_request_is_replayed() {
        let store = Arc::new(MemoryStore::new());
        store
            .create_endpoint(
                serde_json::from_value(json!({
                    "path": "/Users",
                    "method": "GET",
                    "statusCode": 201,
                    "headers": { "x-mock": "yes" },
                    "responseBody": { "hello": "world" }
                }))
                .unwrap(),
            )
            .await;
        let app = app(store);

        // Lookup is case-insensitive against the registered path.
        let response = app.oneshot(request("GET", "/users")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()["x-mock"], "yes");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "hello": "world" }));
    }

    #[tokio::test]
    async fn test_bodyless_mock_returns_status_only() {
        let store = Arc::new(MemoryStore::new());
        store
            .create_endpoint(
                serde_json::from_value(json!({
                    "path": "/gone",
                    "method": "DELETE",
                    "statusCode": 204
                }))
                .unwrap(),
            )
            .await;
        let app = app(store);

        let response = app.oneshot(request("DELETE", "/gone")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_delay_suspends_before_responding() {
        let store = Arc::new(MemoryStore::new());
        store
            .create_endpoint(
                serde_json::from_value(json!({
                    "path": "/slow",
                    "method": "GET",
                    "delayMs": 50,
                    "responseBody": { "ok": true }
                }))
                .unwrap(),
            )
            .await;
        let app = app(store);

        let start = std::time::Instant::now();
        let response = app.oneshot(request("GET", "/slow")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_unwritable_header_surfaces_as_fault() {
        let store = Arc::new(MemoryStore::new());
        store
            .create_endpoint(
                serde_json::from_value(json!({
                    "path": "/broken",
                    "method": "GET",
                    "headers": { "bad header name": "value" }
                }))
                .unwrap(),
            )
            .await;
        let app = app(store);

        let response = app.oneshot(request("GET", "/broken")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
