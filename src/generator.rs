//! Synthetic data generation.
//!
//! Turns a simplified schema, an API-document operation, or a literal
//! example template into a concrete JSON value. All transforms are
//! recursive and purely functional: inputs are never mutated in place.

use crate::error::Error;
use crate::openapi::{self, ApiDocument};
use crate::provider;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Response-map keys recognized as success responses.
const SUCCESS_KEYS: [&str; 4] = ["200", "201", "OK", "Created"];

/// Synthetic data generator.
///
/// Stateless; every call draws fresh values from the provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator;

impl Generator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a value from simplified JSON-Schema-like text.
    ///
    /// Only `type`, `properties`, and `items` are interpreted. A node that
    /// is not an object, or carries no `type`, yields an empty object
    /// rather than an error.
    pub fn from_schema(&self, schema_text: &str) -> Result<Value, Error> {
        let schema: Value = serde_json::from_str(schema_text)
            .map_err(|err| Error::InvalidSchema(err.to_string()))?;
        Ok(generate_from_node(&schema))
    }

    /// Generate a value for one operation of a parsed API document.
    ///
    /// Picks the first success response (`200`, `201`, `OK`, `Created`).
    /// A literal example wins over a schema; a schema yields a generic
    /// default payload; no success response yields a minimal one.
    pub fn from_operation(
        &self,
        document: &ApiDocument,
        path: &str,
        method: &str,
    ) -> Result<Value, Error> {
        let path_item = document
            .paths
            .get(path)
            .ok_or_else(|| Error::PathNotFound(path.to_string()))?;

        let operation = path_item
            .operation(method)
            .ok_or_else(|| Error::OperationNotFound {
                method: method.to_string(),
                path: path.to_string(),
            })?;

        let success = operation
            .responses
            .iter()
            .find(|(key, _)| SUCCESS_KEYS.contains(&key.as_str()));

        let Some((status, response)) = success else {
            debug!(path, method, "no success response in document, using minimal payload");
            return Ok(json!({ "message": "Success" }));
        };
        debug!(path, method, status = %status, "generating from operation response");

        for media in response.content.values() {
            if let Some(example) = &media.example {
                return Ok(example.clone());
            }
            if media.schema.is_some() {
                return Ok(default_payload());
            }
        }

        Ok(default_payload())
    }

    /// Parse API-document text and generate for the given operation.
    ///
    /// Parser diagnostics fail the whole call with `InvalidSchema`.
    pub fn from_openapi(&self, text: &str, path: &str, method: &str) -> Result<Value, Error> {
        let (document, diagnostics) = openapi::parse(text);
        if !diagnostics.is_empty() {
            let messages: Vec<String> =
                diagnostics.into_iter().map(|d| d.message).collect();
            return Err(Error::InvalidSchema(messages.join(", ")));
        }
        self.from_operation(&document, path, method)
    }

    /// Materialize fake data from a literal example template.
    ///
    /// With `count > 1` and an object or array template, returns an array
    /// of `count` independently generated instances; otherwise `count` is
    /// ignored.
    pub fn from_example(&self, example: &Value, count: Option<u32>) -> Result<Value, Error> {
        if let Some(count) = count.filter(|&c| c > 1) {
            if example.is_object() || example.is_array() {
                let items = (0..count)
                    .map(|_| materialize(example))
                    .collect::<Result<Vec<_>, _>>()?;
                return Ok(Value::Array(items));
            }
        }
        materialize(example)
    }
}

/// Recursive schema interpretation.
fn generate_from_node(node: &Value) -> Value {
    let Some(obj) = node.as_object() else {
        return Value::Object(Map::new());
    };
    let Some(node_type) = obj.get("type").and_then(Value::as_str) else {
        return Value::Object(Map::new());
    };

    match node_type {
        "object" => generate_object(obj),
        "array" => generate_array(obj),
        "string" => json!(provider::sentence()),
        "number" => json!(provider::number()),
        "integer" => json!(provider::integer()),
        "boolean" => json!(provider::boolean()),
        _ => json!(provider::word()),
    }
}

fn generate_object(schema: &Map<String, Value>) -> Value {
    let mut result = Map::new();
    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (key, prop_schema) in properties {
            if prop_schema.is_object() {
                result.insert(key.clone(), generate_from_node(prop_schema));
            }
        }
    }
    Value::Object(result)
}

fn generate_array(schema: &Map<String, Value>) -> Value {
    let mut result = Vec::new();
    if let Some(items) = schema.get("items") {
        for _ in 0..provider::element_count() {
            result.push(generate_from_node(items));
        }
    }
    Value::Array(result)
}

/// The intentionally generic payload used when an operation only has a
/// response schema. Representative fields, not derived from the schema.
fn default_payload() -> Value {
    json!({
        "id": provider::uuid(),
        "name": provider::full_name(),
        "email": provider::email(),
        "createdAt": provider::past_date(),
        "status": provider::pick(&["active", "inactive", "pending"]),
        "data": {
            "description": provider::paragraph(),
            "value": provider::amount(),
        },
    })
}

/// Recursive template materialization. Objects keep their keys, arrays
/// keep their length; every scalar is replaced independently.
fn materialize(template: &Value) -> Result<Value, Error> {
    match template {
        Value::Object(obj) => {
            let mut result = Map::new();
            for (key, value) in obj {
                result.insert(key.clone(), materialize(value)?);
            }
            Ok(Value::Object(result))
        }
        Value::Array(items) => {
            let items = items.iter().map(materialize).collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(items))
        }
        Value::String(text) => Ok(materialize_string(text)),
        Value::Number(seed) => materialize_number(seed),
        Value::Bool(_) => Ok(json!(provider::boolean())),
        Value::Null => Ok(Value::Null),
    }
}

fn materialize_string(text: &str) -> Value {
    if let Some(token) = placeholder_token(text) {
        return provider::resolve_token(token).unwrap_or_else(|| json!(provider::word()));
    }
    json!(provider::masked(text.chars().count()))
}

fn materialize_number(seed: &serde_json::Number) -> Result<Value, Error> {
    if let Some(n) = seed.as_i64() {
        return Ok(json!(provider::integer_between(0, n.saturating_mul(2))));
    }
    if let Some(n) = seed.as_u64() {
        let upper = i64::try_from(n.saturating_mul(2)).unwrap_or(i64::MAX);
        return Ok(json!(provider::integer_between(0, upper)));
    }
    let x = seed.as_f64().unwrap_or_default();
    let upper = x * 2.0;
    if !upper.is_finite() {
        return Err(Error::GenerationFailed(format!(
            "number materialization (seed {x} doubles out of range)"
        )));
    }
    Ok(json!(provider::float_between(0.0, upper)))
}

/// Extract the `provider.method` token from a `{{provider.method}}`
/// placeholder string, or `None` for ordinary strings.
fn placeholder_token(text: &str) -> Option<&str> {
    let token = text.strip_prefix("{{")?.strip_suffix("}}")?.trim();
    let dotted = token.contains('.');
    let well_formed = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
    (dotted && well_formed).then_some(token)
}
