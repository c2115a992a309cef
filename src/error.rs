//! Error taxonomy shared by the generator, registry, and management API.

use thiserror::Error;

/// Errors surfaced by mocksmith components.
///
/// Registry misses are reported as `Option`/`bool` by the store itself;
/// `NotFound` exists for the management layer, which turns a miss into a
/// client-facing 404.
#[derive(Debug, Error)]
pub enum Error {
    /// Schema text could not be parsed, or an API document carried
    /// parser diagnostics.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The requested path is not defined in the API document.
    #[error("path '{0}' not found in API document")]
    PathNotFound(String),

    /// The path exists but carries no operation for the method.
    #[error("method '{method}' not defined for path '{path}'")]
    OperationNotFound { method: String, path: String },

    /// Any other fault during data materialization.
    #[error("generation failed during {0}")]
    GenerationFailed(String),

    /// A lookup, update, or delete missed.
    #[error("{0} not found")]
    NotFound(String),

    /// The caller supplied an unusable entity.
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}
