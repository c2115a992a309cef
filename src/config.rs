//! Process configuration.
//!
//! Loaded from a YAML file; everything has a default so the server also
//! starts with no file at all. Seed definitions are loaded into the
//! registry at startup.

use crate::model::{MockEndpoint, MockSchema};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Main configuration for the mock engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Address the server binds to.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Path prefix reserved for the management API; requests under it
    /// bypass mock resolution.
    #[serde(default = "default_management_prefix")]
    pub management_prefix: String,

    /// Whether schema content is parse-checked on create.
    #[serde(default = "default_true")]
    pub validate_schemas: bool,

    /// Definitions preloaded into the registry at startup.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Endpoints and schemas registered before the server starts serving.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    #[serde(default)]
    pub endpoints: Vec<MockEndpoint>,

    #[serde(default)]
    pub schemas: Vec<MockSchema>,
}

fn default_listen() -> SocketAddr {
    ([127, 0, 0, 1], 4000).into()
}

fn default_management_prefix() -> String {
    "/api".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            management_prefix: default_management_prefix(),
            validate_schemas: true,
            seed: SeedConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.management_prefix.starts_with('/') || self.management_prefix.len() < 2 {
            anyhow::bail!(
                "management_prefix '{}' must be a non-root path starting with '/'",
                self.management_prefix
            );
        }
        if self.management_prefix.ends_with('/') {
            anyhow::bail!(
                "management_prefix '{}' must not end with '/'",
                self.management_prefix
            );
        }
        for (i, endpoint) in self.seed.endpoints.iter().enumerate() {
            endpoint
                .validate()
                .map_err(|e| anyhow::anyhow!("Seed endpoint {}: {}", i, e))?;
        }
        for (i, schema) in self.seed.schemas.iter().enumerate() {
            schema
                .validate()
                .map_err(|e| anyhow::anyhow!("Seed schema {}: {}", i, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.management_prefix, "/api");
        assert!(config.validate_schemas);
        assert!(config.seed.endpoints.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
listen: "0.0.0.0:8080"
management_prefix: /admin
validate_schemas: false
seed:
  endpoints:
    - path: /hello
      method: GET
      statusCode: 200
      responseBody:
        message: "Hello, World!"
    - path: /slow
      delayMs: 500
  schemas:
    - id: user
      schemaType: JSON
      content: '{ "type": "object" }'
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.management_prefix, "/admin");
        assert!(!config.validate_schemas);
        assert_eq!(config.seed.endpoints.len(), 2);
        assert_eq!(config.seed.endpoints[1].delay_ms, 500);
        assert_eq!(config.seed.schemas.len(), 1);
    }

    #[test]
    fn test_bad_management_prefix_rejected() {
        let config: EngineConfig =
            serde_yaml::from_str("management_prefix: admin").unwrap();
        assert!(config.validate().is_err());

        let config: EngineConfig =
            serde_yaml::from_str("management_prefix: /admin/").unwrap();
        assert!(config.validate().is_err());

        let config: EngineConfig = serde_yaml::from_str("management_prefix: /").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_seed_endpoint_rejected() {
        let yaml = r#"
seed:
  endpoints:
    - path: /bad
      statusCode: 99
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Seed endpoint 0"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<EngineConfig, _> = serde_yaml::from_str("listne: \"1.2.3.4:1\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mocksmith.yaml");
        std::fs::write(&path, "management_prefix: /api\n").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.management_prefix, "/api");

        assert!(EngineConfig::from_file(&dir.path().join("missing.yaml")).is_err());
    }
}
