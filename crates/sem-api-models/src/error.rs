//! Error types for resource model parsing, serialization and validation.

use thiserror::Error;

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Local shape failures raised before any request leaves the process.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The resource has no `metadata.name`.
    #[error("{kind} name can't be blank")]
    BlankName {
        /// Resource kind that failed validation.
        kind: &'static str,
    },
    /// A manifest carried a field the resource does not define.
    #[error("unknown field '{path}' in {kind} manifest")]
    UnknownField {
        /// Resource kind being parsed.
        kind: &'static str,
        /// Dotted path of the offending field.
        path: String,
    },
    /// JSON payload could not be decoded.
    #[error("failed to deserialize {kind} object from JSON: {detail}")]
    JsonDecode {
        /// Resource kind being parsed.
        kind: &'static str,
        /// Decoder error detail.
        detail: serde_json::Error,
    },
    /// YAML payload could not be decoded.
    #[error("failed to deserialize {kind} object from YAML: {detail}")]
    YamlDecode {
        /// Resource kind being parsed.
        kind: &'static str,
        /// Decoder error detail.
        detail: serde_yaml::Error,
    },
    /// Resource could not be encoded as JSON.
    #[error("failed to serialize {kind} object to JSON: {detail}")]
    JsonEncode {
        /// Resource kind being encoded.
        kind: &'static str,
        /// Encoder error detail.
        detail: serde_json::Error,
    },
    /// Resource could not be encoded as YAML.
    #[error("failed to serialize {kind} object to YAML: {detail}")]
    YamlEncode {
        /// Resource kind being encoded.
        kind: &'static str,
        /// Encoder error detail.
        detail: serde_yaml::Error,
    },
    /// A job state filter was not recognised.
    #[error("unknown job state '{value}' (expected PENDING, QUEUED, RUNNING or FINISHED)")]
    InvalidJobState {
        /// Value supplied by the caller.
        value: String,
    },
}
