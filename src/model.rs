//! Data model for registered mocks and stored schemas.

use crate::error::Error;
use crate::generator::Generator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A registered synthetic response, matched by path and method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockEndpoint {
    /// Unique identifier; assigned by the store on creation when nil.
    #[serde(default)]
    pub id: Uuid,

    /// Request path to match (case-insensitive, exact).
    pub path: String,

    /// HTTP method to match (case-insensitive).
    #[serde(default = "default_method")]
    pub method: String,

    /// Status code returned on a match.
    #[serde(default = "default_status")]
    pub status_code: u16,

    /// Headers applied verbatim to the response.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Response payload, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<serde_json::Value>,

    /// Milliseconds to suspend before writing the response.
    #[serde(default)]
    pub delay_ms: u64,

    /// Set by the store on creation, immutable afterward.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Once passed, the endpoint disappears from listings and is
    /// eligible for removal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Reserved for durability policy.
    #[serde(default)]
    pub is_persistent: bool,

    /// Schema used to materialize `response_body` at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_status() -> u16 {
    200
}

impl MockEndpoint {
    /// Validate the endpoint definition.
    pub fn validate(&self) -> Result<(), Error> {
        if self.path.is_empty() {
            return Err(Error::ValidationFailed("path cannot be empty".to_string()));
        }
        if !self.path.starts_with('/') {
            return Err(Error::ValidationFailed(format!(
                "path '{}' must start with '/'",
                self.path
            )));
        }
        if self.method.is_empty() {
            return Err(Error::ValidationFailed("method cannot be empty".to_string()));
        }
        if self.status_code < 100 || self.status_code > 599 {
            return Err(Error::ValidationFailed(format!(
                "invalid status code: {}",
                self.status_code
            )));
        }
        Ok(())
    }

    /// Whether the endpoint has expired relative to `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}

/// Discriminator for stored schema bodies.
///
/// Anything that is not `"OpenAPI"` is treated as the simplified
/// JSON-Schema-like structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SchemaType {
    OpenApi,
    #[default]
    Json,
}

impl From<String> for SchemaType {
    fn from(value: String) -> Self {
        if value == "OpenAPI" {
            SchemaType::OpenApi
        } else {
            SchemaType::Json
        }
    }
}

impl From<SchemaType> for String {
    fn from(value: SchemaType) -> Self {
        match value {
            SchemaType::OpenApi => "OpenAPI".to_string(),
            SchemaType::Json => "JSON".to_string(),
        }
    }
}

/// A named schema body used to synthesize response payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockSchema {
    /// Caller-supplied identifier; generated by the store when empty.
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub schema_type: SchemaType,

    /// Raw schema text; format depends on `schema_type`.
    pub content: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MockSchema {
    /// Validate the schema definition.
    pub fn validate(&self) -> Result<(), Error> {
        if self.content.is_empty() {
            return Err(Error::ValidationFailed(
                "schema content cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Materialize a response body from this schema.
    ///
    /// Dispatches on `schema_type`: OpenAPI documents are resolved against
    /// the given path and method, generic schemas ignore both.
    pub fn generate(
        &self,
        generator: &Generator,
        path: &str,
        method: &str,
    ) -> Result<serde_json::Value, Error> {
        match self.schema_type {
            SchemaType::OpenApi => generator.from_openapi(&self.content, path, method),
            SchemaType::Json => generator.from_schema(&self.content),
        }
    }
}
