//! Typed CRUD operations over any [`Resource`] kind.
//!
//! # Design
//! - One generic client; the resource type supplies kind, path and version.
//! - Exactly `200 OK` is success. Anything else becomes [`ClientError::Upstream`].
//! - Writes validate and serialize locally before any request is sent.

use std::marker::PhantomData;

use reqwest::StatusCode;
use sem_api_models::{Job, JobList, JobState, Resource, ResourceList};
use sem_config::ClientConfig;
use tracing::{debug, instrument};

use crate::error::{ClientError, ClientResult};
use crate::transport::{BaseClient, RawResponse};

/// Remote operations for the resource kind `R`.
pub struct ResourceApi<R> {
    base: BaseClient,
    marker: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            marker: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for ResourceApi<R> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ResourceApi")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceApi<R> {
    /// Client for `R` using the given connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the settings cannot produce an HTTP client.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        BaseClient::from_config(config).map(Self::from_base)
    }

    /// Wrap an existing transport, switching it to `R`'s API version.
    #[must_use]
    pub fn from_base(mut base: BaseClient) -> Self {
        base.set_api_version(R::API_VERSION);
        Self {
            base,
            marker: PhantomData,
        }
    }

    /// Underlying transport.
    #[must_use]
    pub const fn base(&self) -> &BaseClient {
        &self.base
    }

    /// Fetch the whole collection.
    ///
    /// # Errors
    ///
    /// Returns a connection, upstream or decode error.
    #[instrument(skip_all, fields(kind = R::KIND))]
    pub async fn list(&self) -> ClientResult<R::List> {
        let response = self.base.list(R::PLURAL).await?;
        decode_list::<R>(&expect_ok(response)?)
    }

    /// Fetch the collection filtered by query parameters; keys may repeat.
    ///
    /// # Errors
    ///
    /// Returns a connection, upstream or decode error.
    #[instrument(skip_all, fields(kind = R::KIND))]
    pub async fn list_with_params(&self, params: &[(&str, &str)]) -> ClientResult<R::List> {
        let response = self.base.list_with_params(R::PLURAL, params).await?;
        decode_list::<R>(&expect_ok(response)?)
    }

    /// Fetch a single resource by name (or id).
    ///
    /// # Errors
    ///
    /// Returns a connection, upstream or decode error.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn get(&self, name: &str) -> ClientResult<R> {
        let response = self.base.get(R::PLURAL, name).await?;
        Ok(R::from_json(&expect_ok(response)?)?)
    }

    /// Create `resource` upstream.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Model`] for a blank name without contacting the
    /// server, otherwise a connection or upstream error.
    #[instrument(skip_all, fields(kind = R::KIND, name = resource.name()))]
    pub async fn create(&self, resource: &R) -> ClientResult<()> {
        resource.validate()?;
        let body = resource.to_json()?;
        let response = self.base.post(R::PLURAL, body).await?;
        expect_ok(response)?;
        debug!("resource created");
        Ok(())
    }

    /// Update `resource` upstream, addressed by id when set, otherwise by name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Model`] for a blank name without contacting the
    /// server, otherwise a connection or upstream error.
    #[instrument(skip_all, fields(kind = R::KIND, name = resource.name()))]
    pub async fn update(&self, resource: &R) -> ClientResult<()> {
        resource.validate()?;
        let body = resource.to_json()?;
        let response = self
            .base
            .patch(R::PLURAL, resource.identifier(), body)
            .await?;
        expect_ok(response)?;
        debug!("resource updated");
        Ok(())
    }

    /// Delete the resource called `name`.
    ///
    /// # Errors
    ///
    /// Returns a connection or upstream error.
    #[instrument(skip(self), fields(kind = R::KIND))]
    pub async fn delete(&self, name: &str) -> ClientResult<()> {
        let response = self.base.delete(R::PLURAL, name).await?;
        expect_ok(response)?;
        debug!("resource deleted");
        Ok(())
    }
}

impl ResourceApi<Job> {
    /// Jobs in any of `states`, sent as repeated `states` parameters.
    ///
    /// An empty slice lists every job.
    ///
    /// # Errors
    ///
    /// Returns a connection, upstream or decode error.
    pub async fn list_by_states(&self, states: &[JobState]) -> ClientResult<JobList> {
        let params: Vec<(&str, &str)> = states
            .iter()
            .map(|state| ("states", state.as_str()))
            .collect();
        self.list_with_params(&params).await
    }
}

fn expect_ok(response: RawResponse) -> ClientResult<Vec<u8>> {
    if response.status == StatusCode::OK {
        return Ok(response.body);
    }
    Err(ClientError::Upstream {
        status: response.status.as_u16(),
        body: response.text(),
    })
}

fn decode_list<R: Resource>(body: &[u8]) -> ClientResult<R::List> {
    Ok(<R::List as ResourceList>::from_json(body)?)
}
