//! Shared command context and the CLI error type.

use std::fmt::{self, Display, Formatter};

use anyhow::anyhow;
use sem_api_models::{ModelError, Resource};
use sem_client::{ClientError, ResourceApi};
use sem_config::{ClientConfig, ConfigError};

use crate::cli::OutputFormat;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Wrap a client error, prefixing operational failures with `action`.
    pub(crate) fn from_client(err: ClientError, action: impl Display) -> Self {
        match err {
            ClientError::Model(err) => Self::from(err),
            ClientError::Config(err) => Self::from(err),
            other => Self::Failure(anyhow::Error::new(other).context(format!("{action} failed"))),
        }
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl From<ModelError> for CliError {
    fn from(err: ModelError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io { .. } | ConfigError::Parse { .. } | ConfigError::Encode { .. } => {
                Self::Failure(anyhow!(err))
            }
            other => Self::Validation(other.to_string()),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Application context passed to command handlers.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) config: ClientConfig,
    pub(crate) output: Option<OutputFormat>,
}

impl AppContext {
    /// Resource client for `R` built from the resolved settings.
    pub(crate) fn api<R: Resource>(&self) -> CliResult<ResourceApi<R>> {
        ResourceApi::new(&self.config)
            .map_err(|err| CliError::from_client(err, "building the API client"))
    }

    /// Requested output format, or `default` when none was given.
    pub(crate) fn format_or(&self, default: OutputFormat) -> OutputFormat {
        self.output.unwrap_or(default)
    }
}
