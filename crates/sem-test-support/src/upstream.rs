//! Helpers for standing in for the Semaphore API with `httpmock`.

use httpmock::MockServer;

/// API token used by tests talking to a mock upstream.
pub const TEST_TOKEN: &str = "test-token";

/// Host string (with `http://` scheme) addressing a running mock server.
#[must_use]
pub fn mock_host(server: &MockServer) -> String {
    server.base_url()
}

/// Host string that refuses connections, for transport failure tests.
///
/// Port 9 (discard) on loopback is not served in test environments.
#[must_use]
pub const fn unreachable_host() -> &'static str {
    "http://127.0.0.1:9"
}

/// `Authorization` header value expected for [`TEST_TOKEN`].
#[must_use]
pub fn expected_authorization() -> String {
    format!("Token {TEST_TOKEN}")
}
