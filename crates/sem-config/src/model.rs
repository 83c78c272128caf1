//! Config file shape and the resolved connection settings.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults::DEFAULT_TIMEOUT_SECS;
use crate::error::{ConfigError, ConfigResult};
use crate::validate::parse_host;

/// Contents of `~/.sem.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SemConfigFile {
    /// Name of the context used when none is requested explicitly.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub active_context: String,
    /// Known organisations keyed by context name.
    #[serde(default)]
    pub contexts: BTreeMap<String, ContextEntry>,
}

/// Connection details for one organisation.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContextEntry {
    /// API host, e.g. `acme.semaphoreci.com`.
    #[serde(default)]
    pub host: String,
    /// Credentials.
    #[serde(default)]
    pub auth: ContextAuth,
    /// Value for the user-id header; generated per request when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Credentials stored for a context.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextAuth {
    /// API token sent as `Authorization: Token <token>`.
    #[serde(default)]
    pub token: String,
}

impl SemConfigFile {
    /// The active context, if one is selected and present.
    #[must_use]
    pub fn active(&self) -> Option<&ContextEntry> {
        self.contexts.get(&self.active_context)
    }

    /// Select `name` as the active context.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownContext`] if no such context exists.
    pub fn set_active(&mut self, name: &str) -> ConfigResult<()> {
        if !self.contexts.contains_key(name) {
            return Err(ConfigError::UnknownContext {
                name: name.to_string(),
            });
        }
        self.active_context = name.to_string();
        Ok(())
    }

    /// Context names in sorted order.
    pub fn context_names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }
}

impl fmt::Debug for ContextEntry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ContextEntry")
            .field("host", &self.host)
            .field("auth", &self.auth)
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl fmt::Debug for ContextAuth {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ContextAuth")
            .field("token", &redact(&self.token))
            .finish()
    }
}

/// Fully resolved settings handed to the HTTP client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API host, optionally prefixed with a scheme.
    pub host: String,
    /// API token.
    pub auth_token: String,
    /// Fixed user-id header value; a fresh id is generated per request when `None`.
    pub user_id: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Settings for `host` authenticated by `auth_token`, with the default timeout.
    #[must_use]
    pub fn new(host: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            auth_token: auth_token.into(),
            user_id: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Use a fixed user id for every request.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL (`scheme://host[:port]/`) for API requests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when the host cannot form a URL.
    pub fn base_url(&self) -> ConfigResult<Url> {
        parse_host(&self.host)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("auth_token", &redact(&self.auth_token))
            .field("user_id", &self.user_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

const fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<empty>" } else { "<redacted>" }
}
