//! Field checks applied to resolved settings.

use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Parse a host into the base URL requests are built from.
///
/// A bare hostname (`acme.semaphoreci.com`) is served over HTTPS. An explicit
/// `http://` or `https://` prefix is kept, which is how local and test servers
/// are addressed.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for blank hosts, unsupported schemes,
/// or hosts carrying a path, query or fragment.
pub fn parse_host(host: &str) -> ConfigResult<Url> {
    let trimmed = host.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(invalid_host("must not be empty"));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|err| invalid_host(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_host("scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid_host("must name a server"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid_host("must not include a path, query or fragment"));
    }
    Ok(url)
}

/// Ensure an API token is present and free of whitespace.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when the token is blank or contains
/// whitespace (it is sent verbatim in the `Authorization` header).
pub fn validate_token(token: &str) -> ConfigResult<()> {
    if token.is_empty() {
        return Err(ConfigError::InvalidField {
            field: "auth.token",
            message: "must not be empty".to_string(),
        });
    }
    if token.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidField {
            field: "auth.token",
            message: "must not contain whitespace".to_string(),
        });
    }
    Ok(())
}

fn invalid_host(message: &str) -> ConfigError {
    ConfigError::InvalidField {
        field: "host",
        message: message.to_string(),
    }
}
