//! Resolve `ClientConfig` from flags, environment and `~/.sem.yaml`.
//!
//! # Design
//! - Precedence per field: explicit override, then environment, then the
//!   selected context in the config file.
//! - Environment access goes through an injectable lookup so resolution is
//!   testable without touching the process environment.
//! - A missing config file is not an error; missing required fields are.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::defaults::{
    CONFIG_FILE_NAME, DEFAULT_TIMEOUT_SECS, ENV_API_TOKEN, ENV_CONFIG_PATH, ENV_HOST,
    ENV_TIMEOUT_SECS, ENV_USER_ID,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{ClientConfig, ContextEntry, SemConfigFile};
use crate::validate::{parse_host, validate_token};

/// Environment lookup used by the loader.
pub type EnvSource = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Values supplied on the command line; each wins over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Context to use instead of the file's active context.
    pub context: Option<String>,
    /// API host.
    pub host: Option<String>,
    /// API token.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Locates, reads, writes and resolves the client configuration.
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: EnvSource,
}

impl ConfigLoader {
    /// Loader backed by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_env(|key| std::env::var(key).ok())
    }

    /// Loader backed by a custom environment lookup.
    #[must_use]
    pub fn with_env(env: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            path: None,
            env: Box::new(env),
        }
    }

    /// Use an explicit config file path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Path of the config file: explicit path, then `SEM_CONFIG`, then `$HOME/.sem.yaml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigPath`] when none of those are available.
    pub fn config_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if let Some(path) = self.var(ENV_CONFIG_PATH) {
            return Ok(PathBuf::from(path));
        }
        self.var("HOME")
            .map(|home| Path::new(&home).join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigPath {
                env: ENV_CONFIG_PATH,
            })
    }

    /// Read the config file, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`] when the file exists
    /// but cannot be read or decoded.
    pub fn read_file(&self) -> ConfigResult<Option<SemConfigFile>> {
        let path = self.config_path()?;
        read_config_file(&path)
    }

    /// Persist the config file, restricting permissions to the owner on Unix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Encode`] or [`ConfigError::Io`] on failure.
    pub fn write_file(&self, file: &SemConfigFile) -> ConfigResult<()> {
        let path = self.config_path()?;
        let text = serde_yaml::to_string(file).map_err(|detail| ConfigError::Encode { detail })?;
        write_private(&path, text.as_bytes()).map_err(|source| ConfigError::Io {
            operation: "write",
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "config file written");
        Ok(())
    }

    /// Merge every source into a validated [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when host or token are not supplied by
    /// any source, [`ConfigError::UnknownContext`] for an unknown context
    /// override, and [`ConfigError::InvalidField`] for unusable values.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> ConfigResult<ClientConfig> {
        let file = match self.config_path() {
            Ok(path) => read_config_file(&path)?.unwrap_or_default(),
            Err(ConfigError::NoConfigPath { .. }) => SemConfigFile::default(),
            Err(err) => return Err(err),
        };

        let context = select_context(&file, overrides.context.as_deref())?;

        let host = first_present([
            overrides.host.clone(),
            self.var(ENV_HOST),
            context.map(|entry| entry.host.clone()),
        ])
        .ok_or(ConfigError::Missing {
            field: "host",
            env: ENV_HOST,
        })?;
        parse_host(&host)?;

        let auth_token = first_present([
            overrides.token.clone(),
            self.var(ENV_API_TOKEN),
            context.map(|entry| entry.auth.token.clone()),
        ])
        .ok_or(ConfigError::Missing {
            field: "auth.token",
            env: ENV_API_TOKEN,
        })?;
        validate_token(&auth_token)?;

        let user_id = first_present([
            self.var(ENV_USER_ID),
            context.and_then(|entry| entry.user_id.clone()),
        ]);

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => self
                .var(ENV_TIMEOUT_SECS)
                .map(|raw| parse_timeout(&raw))
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidField {
                field: "timeout",
                message: "must be at least one second".to_string(),
            });
        }

        debug!(
            host = %host,
            context = overrides.context.as_deref().unwrap_or(&file.active_context),
            timeout_secs,
            "resolved client configuration"
        );

        let mut config = ClientConfig::new(host, auth_token)
            .with_timeout(Duration::from_secs(timeout_secs));
        config.user_id = user_id;
        Ok(config)
    }

    fn var(&self, key: &str) -> Option<String> {
        (self.env)(key).filter(|value| !value.trim().is_empty())
    }
}

fn select_context<'a>(
    file: &'a SemConfigFile,
    requested: Option<&str>,
) -> ConfigResult<Option<&'a ContextEntry>> {
    match requested {
        Some(name) => file
            .contexts
            .get(name)
            .map(Some)
            .ok_or_else(|| ConfigError::UnknownContext {
                name: name.to_string(),
            }),
        None => Ok(file.active()),
    }
}

fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_timeout(raw: &str) -> ConfigResult<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidField {
            field: "timeout",
            message: format!("'{raw}' is not a whole number of seconds"),
        })
}

fn read_config_file(path: &Path) -> ConfigResult<Option<SemConfigFile>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                operation: "read",
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if text.trim().is_empty() {
        return Ok(Some(SemConfigFile::default()));
    }
    serde_yaml::from_str(&text)
        .map(Some)
        .map_err(|detail| ConfigError::Parse {
            path: path.to_path_buf(),
            detail,
        })
}

fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()
}
