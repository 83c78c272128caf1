//! Verb-shaped HTTP transport.
//!
//! # Design
//! - Owns connection parameters (base URL, token, user id, API version).
//! - Every request carries the same header set; request ids are fresh per call.
//! - Returns raw status and body. Interpreting the status is the caller's job.

use std::fmt;
use std::time::Instant;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use sem_config::ClientConfig;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};

/// Header carrying a per-request correlation id.
pub const HEADER_REQUEST_ID: &str = "x-semaphore-req-id";
/// Header carrying the caller's user id.
pub const HEADER_USER_ID: &str = "x-semaphore-user-id";

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response body, read in full.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Thin wrapper over `reqwest` addressing `/api/{version}/{kind}[/{name}]`.
#[derive(Clone)]
pub struct BaseClient {
    http: Client,
    base_url: Url,
    auth_token: String,
    user_id: Option<String>,
    api_version: String,
}

impl BaseClient {
    /// Build a transport from resolved connection settings.
    ///
    /// The API version starts empty; resource clients set their own.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] for an unusable host and
    /// [`ClientError::Build`] when the HTTP client cannot be created.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|detail| ClientError::Build { detail })?;
        Ok(Self {
            http,
            base_url,
            auth_token: config.auth_token.clone(),
            user_id: config.user_id.clone(),
            api_version: String::new(),
        })
    }

    /// Select the API version used in request paths.
    pub fn set_api_version(&mut self, api_version: impl Into<String>) -> &mut Self {
        self.api_version = api_version.into();
        self
    }

    /// API version currently used in request paths.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// URL for `kind`, or for the single `name` under it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when the base URL cannot carry a path.
    pub fn endpoint(&self, kind: &str, name: Option<&str>) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidBaseUrl {
                    base: self.base_url.to_string(),
                })?;
            segments.clear().extend(["api", self.api_version.as_str(), kind]);
            if let Some(name) = name {
                segments.push(name);
            }
        }
        Ok(url)
    }

    fn headers(&self) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HEADER_REQUEST_ID,
            header_value(HEADER_REQUEST_ID, &Uuid::new_v4().to_string())?,
        );
        let user_id = self
            .user_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        headers.insert(HEADER_USER_ID, header_value(HEADER_USER_ID, &user_id)?);
        let mut auth = header_value("authorization", &format!("Token {}", self.auth_token))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> ClientResult<RawResponse> {
        let started = Instant::now();
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .headers(self.headers()?);
        if let Some(body) = body {
            request = request.body(body);
        }
        let connection_error = |detail| ClientError::Connection {
            method: method.to_string(),
            url: url.to_string(),
            detail,
        };
        let response = request.send().await.map_err(connection_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(connection_error)?.to_vec();
        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "request completed"
        );
        Ok(RawResponse { status, body })
    }

    /// `GET /api/{version}/{kind}/{name}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] when the exchange fails.
    pub async fn get(&self, kind: &str, name: &str) -> ClientResult<RawResponse> {
        let url = self.endpoint(kind, Some(name))?;
        self.execute(Method::GET, url, None).await
    }

    /// `GET /api/{version}/{kind}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] when the exchange fails.
    pub async fn list(&self, kind: &str) -> ClientResult<RawResponse> {
        self.list_with_params(kind, &[]).await
    }

    /// `GET /api/{version}/{kind}?k=v&k=v2...`; repeated keys are sent separately.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] when the exchange fails.
    pub async fn list_with_params(
        &self,
        kind: &str,
        params: &[(&str, &str)],
    ) -> ClientResult<RawResponse> {
        let mut url = self.endpoint(kind, None)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().copied());
        }
        self.execute(Method::GET, url, None).await
    }

    /// `DELETE /api/{version}/{kind}/{name}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] when the exchange fails.
    pub async fn delete(&self, kind: &str, name: &str) -> ClientResult<RawResponse> {
        let url = self.endpoint(kind, Some(name))?;
        self.execute(Method::DELETE, url, None).await
    }

    /// `POST /api/{version}/{kind}` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] when the exchange fails.
    pub async fn post(&self, kind: &str, body: Vec<u8>) -> ClientResult<RawResponse> {
        let url = self.endpoint(kind, None)?;
        self.execute(Method::POST, url, Some(body)).await
    }

    /// `PATCH /api/{version}/{kind}/{identifier}` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] when the exchange fails.
    pub async fn patch(
        &self,
        kind: &str,
        identifier: &str,
        body: Vec<u8>,
    ) -> ClientResult<RawResponse> {
        let url = self.endpoint(kind, Some(identifier))?;
        self.execute(Method::PATCH, url, Some(body)).await
    }
}

impl fmt::Debug for BaseClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BaseClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

fn header_value(header: &'static str, value: &str) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader { header })
}
