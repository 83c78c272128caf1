//! Error types for configuration loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("failed to {operation} config file '{}'", path.display())]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// File involved.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// Config file was not valid YAML for the expected shape.
    #[error("config file '{}' is invalid: {detail}", path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Decoder error detail.
        detail: serde_yaml::Error,
    },
    /// Config file could not be encoded.
    #[error("failed to encode config file: {detail}")]
    Encode {
        /// Encoder error detail.
        detail: serde_yaml::Error,
    },
    /// No home directory to derive the default config path from.
    #[error("cannot locate config file: set {env} or HOME")]
    NoConfigPath {
        /// Environment variable that would override the path.
        env: &'static str,
    },
    /// A named context does not exist in the config file.
    #[error("context '{name}' does not exist")]
    UnknownContext {
        /// Context requested by the caller.
        name: String,
    },
    /// A required setting was not provided by any source.
    #[error("{field} is not configured (set it in the config file or via {env})")]
    Missing {
        /// Setting name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A setting was present but unusable.
    #[error("invalid value for '{field}': {message}")]
    InvalidField {
        /// Setting name.
        field: &'static str,
        /// Human-readable error description.
        message: String,
    },
}
