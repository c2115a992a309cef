//! Management REST API.
//!
//! CRUD over registered mocks and schemas, plus on-demand generation from
//! an example template. This layer is the only caller of the generator:
//! a mock that references a schema gets its response body materialized
//! here, at creation time.

use crate::error::Error;
use crate::generator::Generator;
use crate::model::{MockEndpoint, MockSchema, SchemaType};
use crate::openapi;
use crate::store::MockStore;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Shared state for management handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn MockStore>,
    pub generator: Generator,
    /// Whether schema content is validated on create.
    pub validate_schemas: bool,
}

/// Build the management router. Mounted under the management prefix.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/mocks", get(list_mocks).post(create_mock))
        .route("/mocks/generate-from-example", post(generate_from_example))
        .route(
            "/mocks/:id",
            get(get_mock).put(update_mock).delete(delete_mock),
        )
        .route("/schemas", get(list_schemas).post(create_schema))
        .route(
            "/schemas/:id",
            get(get_schema).put(update_schema).delete(delete_schema),
        )
        .with_state(state)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::GenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

async fn list_mocks(State(state): State<ApiState>) -> Json<Vec<MockEndpoint>> {
    Json(state.store.list_endpoints().await)
}

async fn get_mock(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MockEndpoint>, Error> {
    state
        .store
        .endpoint(id)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound("mock endpoint".to_string()))
}

async fn create_mock(
    State(state): State<ApiState>,
    Json(mut mock): Json<MockEndpoint>,
) -> Result<(StatusCode, Json<MockEndpoint>), Error> {
    mock.validate()?;

    // A schema reference materializes the body now; the stored endpoint
    // carries the concrete payload, not the schema.
    if let Some(schema_id) = &mock.schema_id {
        if let Some(schema) = state.store.schema(schema_id).await {
            let body = schema
                .generate(&state.generator, &mock.path, &mock.method)
                .map_err(|err| {
                    warn!(schema_id = %schema_id, %err, "failed to generate mock body from schema");
                    err
                })?;
            mock.response_body = Some(body);
        }
    }

    let created = state.store.create_endpoint(mock).await;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_mock(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(mock): Json<MockEndpoint>,
) -> Result<Json<MockEndpoint>, Error> {
    mock.validate()?;
    state
        .store
        .update_endpoint(id, mock)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound("mock endpoint".to_string()))
}

async fn delete_mock(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    if state.store.delete_endpoint(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound("mock endpoint".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateParams {
    count: Option<u32>,
}

async fn generate_from_example(
    State(state): State<ApiState>,
    Query(params): Query<GenerateParams>,
    Json(example): Json<Value>,
) -> Result<Json<Value>, Error> {
    if example.is_null() {
        return Err(Error::ValidationFailed("example cannot be null".to_string()));
    }
    let generated = state.generator.from_example(&example, params.count)?;
    Ok(Json(generated))
}

async fn list_schemas(State(state): State<ApiState>) -> Json<Vec<MockSchema>> {
    Json(state.store.list_schemas().await)
}

async fn get_schema(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MockSchema>, Error> {
    state
        .store
        .schema(&id)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound("schema".to_string()))
}

async fn create_schema(
    State(state): State<ApiState>,
    Json(schema): Json<MockSchema>,
) -> Result<(StatusCode, Json<MockSchema>), Error> {
    schema.validate()?;
    if state.validate_schemas {
        validate_content(&schema)?;
    }
    let created = state.store.create_schema(schema).await;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_schema(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(schema): Json<MockSchema>,
) -> Result<Json<MockSchema>, Error> {
    schema.validate()?;
    if state.validate_schemas {
        validate_content(&schema)?;
    }
    state
        .store
        .update_schema(&id, schema)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound("schema".to_string()))
}

async fn delete_schema(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    if state.store.delete_schema(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound("schema".to_string()))
    }
}

/// Parse-check schema content against its declared type.
fn validate_content(schema: &MockSchema) -> Result<(), Error> {
    match schema.schema_type {
        SchemaType::OpenApi => {
            let (_, diagnostics) = openapi::parse(&schema.content);
            if !diagnostics.is_empty() {
                let messages: Vec<String> =
                    diagnostics.into_iter().map(|d| d.message).collect();
                return Err(Error::InvalidSchema(messages.join(", ")));
            }
        }
        SchemaType::Json => {
            serde_json::from_str::<Value>(&schema.content)
                .map_err(|err| Error::InvalidSchema(err.to_string()))?;
        }
    }
    Ok(())
}
