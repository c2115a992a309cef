//! Minimal API-document parser.
//!
//! Reads the subset of an OpenAPI document the generator cares about:
//! paths, their operations, and the responses with examples or schemas.
//! Accepts YAML or JSON input. Parse problems are reported as diagnostics
//! rather than errors; callers decide whether diagnostics are fatal.

use serde::Deserialize;
use std::collections::BTreeMap;

/// A parsed API document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiDocument {
    /// Spec version marker (`openapi: 3.x` or `swagger: 2.x`).
    #[serde(default)]
    pub openapi: Option<String>,
    #[serde(default)]
    pub swagger: Option<String>,

    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
}

/// Operations defined for a single path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,
    #[serde(default)]
    pub post: Option<Operation>,
    #[serde(default)]
    pub put: Option<Operation>,
    #[serde(default)]
    pub delete: Option<Operation>,
    #[serde(default)]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Look up an operation by HTTP method, case-insensitively.
    ///
    /// Only GET, POST, PUT, DELETE, and PATCH are recognized.
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => self.get.as_ref(),
            "POST" => self.post.as_ref(),
            "PUT" => self.put.as_ref(),
            "DELETE" => self.delete.as_ref(),
            "PATCH" => self.patch.as_ref(),
            _ => None,
        }
    }
}

/// A single operation with its response map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "operationId")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub responses: BTreeMap<String, ResponseSpec>,
}

/// One response entry, keyed by status in the operation's response map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseSpec {
    #[serde(default)]
    pub description: Option<String>,
    /// Media type to payload description (`application/json` etc).
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// Payload description under a media type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    /// Literal example payload, returned verbatim when present.
    #[serde(default)]
    pub example: Option<serde_json::Value>,
    /// Response schema; its presence selects default-payload generation.
    #[serde(default)]
    pub schema: Option<serde_json::Value>,
}

/// A problem found while reading a document.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
}

/// Parse an API document from YAML or JSON text.
///
/// Never fails outright: an unreadable document yields an empty document
/// plus diagnostics describing what went wrong.
pub fn parse(text: &str) -> (ApiDocument, Vec<Diagnostic>) {
    match serde_yaml::from_str::<ApiDocument>(text) {
        Ok(document) => {
            let mut diagnostics = Vec::new();
            if document.openapi.is_none() && document.swagger.is_none() {
                diagnostics.push(Diagnostic {
                    message: "document has no 'openapi' or 'swagger' version field".to_string(),
                });
            }
            (document, diagnostics)
        }
        Err(err) => (
            ApiDocument::default(),
            vec![Diagnostic {
                message: err.to_string(),
            }],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS_YAML: &str = r#"
openapi: "3.0.0"
paths:
  /pets:
    get:
      summary: List pets
      responses:
        "200":
          description: A list of pets
          content:
            application/json:
              example:
                - name: "Rex"
    post:
      responses:
        "201":
          description: Created
          content:
            application/json:
              schema:
                type: object
"#;

    #[test]
    fn test_parse_yaml_document() {
        let (document, diagnostics) = parse(PETS_YAML);
        assert!(diagnostics.is_empty());
        assert_eq!(document.paths.len(), 1);

        let pets = document.paths.get("/pets").unwrap();
        assert!(pets.get.is_some());
        assert!(pets.post.is_some());
        assert!(pets.delete.is_none());
    }

    #[test]
    fn test_parse_json_document() {
        let json = r#"{
            "openapi": "3.0.0",
            "paths": {
                "/users": {
                    "get": { "responses": { "200": { "description": "ok" } } }
                }
            }
        }"#;
        let (document, diagnostics) = parse(json);
        assert!(diagnostics.is_empty());
        assert!(document.paths.contains_key("/users"));
    }

    #[test]
    fn test_operation_lookup_case_insensitive() {
        let (document, _) = parse(PETS_YAML);
        let pets = document.paths.get("/pets").unwrap();
        assert!(pets.operation("get").is_some());
        assert!(pets.operation("GET").is_some());
        assert!(pets.operation("Post").is_some());
        assert!(pets.operation("DELETE").is_none());
        assert!(pets.operation("OPTIONS").is_none());
    }

    #[test]
    fn test_example_and_schema_surfaced() {
        let (document, _) = parse(PETS_YAML);
        let pets = document.paths.get("/pets").unwrap();

        let ok = pets.get.as_ref().unwrap().responses.get("200").unwrap();
        let media = ok.content.get("application/json").unwrap();
        assert!(media.example.is_some());
        assert!(media.schema.is_none());

        let created = pets.post.as_ref().unwrap().responses.get("201").unwrap();
        let media = created.content.get("application/json").unwrap();
        assert!(media.example.is_none());
        assert!(media.schema.is_some());
    }

    #[test]
    fn test_unreadable_document_yields_diagnostics() {
        let (document, diagnostics) = parse(": not : valid : yaml : [");
        assert!(!diagnostics.is_empty());
        assert!(document.paths.is_empty());
    }

    #[test]
    fn test_missing_version_field_is_diagnosed() {
        let (_, diagnostics) = parse("paths: {}");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("version"));
    }
}
