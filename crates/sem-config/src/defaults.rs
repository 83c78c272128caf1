//! Default file locations, environment keys and timeouts.

/// Config file name looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".sem.yaml";
/// Environment variable overriding the config file path.
pub const ENV_CONFIG_PATH: &str = "SEM_CONFIG";
/// Environment variable overriding the API host.
pub const ENV_HOST: &str = "SEMAPHORE_HOST";
/// Environment variable overriding the API token.
pub const ENV_API_TOKEN: &str = "SEMAPHORE_API_TOKEN";
/// Environment variable supplying the user id header value.
pub const ENV_USER_ID: &str = "SEMAPHORE_USER_ID";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "SEM_HTTP_TIMEOUT_SECS";
/// Request timeout applied when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
