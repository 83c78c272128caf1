//! `create -f` and `apply -f`: resources described by YAML manifests.

use std::fs;
use std::path::Path;

use anyhow::Context;
use sem_api_models::{Job, Resource, Secret};
use tracing::info;

use crate::client::{AppContext, CliError, CliResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifestKind {
    Secret,
    Job,
}

pub(crate) async fn handle_create_from_file(ctx: &AppContext, path: &Path) -> CliResult<()> {
    let bytes = read_manifest(path)?;
    match manifest_kind(&bytes)? {
        ManifestKind::Secret => create::<Secret>(ctx, &bytes).await,
        ManifestKind::Job => create::<Job>(ctx, &bytes).await,
    }
}

pub(crate) async fn handle_apply(ctx: &AppContext, path: &Path) -> CliResult<()> {
    let bytes = read_manifest(path)?;
    match manifest_kind(&bytes)? {
        ManifestKind::Secret => update::<Secret>(ctx, &bytes).await,
        ManifestKind::Job => Err(CliError::validation(
            "jobs cannot be updated; use `sem create -f` to start a new one",
        )),
    }
}

async fn create<R: Resource>(ctx: &AppContext, bytes: &[u8]) -> CliResult<()> {
    let resource = R::from_yaml(bytes)?;
    let label = resource.object_name();
    ctx.api::<R>()?
        .create(&resource)
        .await
        .map_err(|err| CliError::from_client(err, format!("creating {label}")))?;
    info!(kind = R::KIND, name = resource.name(), "resource created");
    println!("{label} created.");
    Ok(())
}

async fn update<R: Resource>(ctx: &AppContext, bytes: &[u8]) -> CliResult<()> {
    let resource = R::from_yaml(bytes)?;
    let label = resource.object_name();
    ctx.api::<R>()?
        .update(&resource)
        .await
        .map_err(|err| CliError::from_client(err, format!("updating {label}")))?;
    info!(kind = R::KIND, name = resource.name(), "resource updated");
    println!("{label} updated.");
    Ok(())
}

fn read_manifest(path: &Path) -> CliResult<Vec<u8>> {
    fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(CliError::failure)
}

fn manifest_kind(bytes: &[u8]) -> CliResult<ManifestKind> {
    let document: serde_yaml::Value = serde_yaml::from_slice(bytes)
        .map_err(|err| CliError::validation(format!("manifest is not valid YAML: {err}")))?;
    match document.get("kind").and_then(serde_yaml::Value::as_str) {
        Some(kind) if kind == Secret::KIND => Ok(ManifestKind::Secret),
        Some(kind) if kind == Job::KIND => Ok(ManifestKind::Job),
        Some(kind) => Err(CliError::validation(format!(
            "unsupported resource kind '{kind}'"
        ))),
        None => Err(CliError::validation("manifest has no 'kind' field")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use sem_config::ClientConfig;
    use sem_test_support::fixtures::{JOB_MANIFEST, SECRET_MANIFEST};
    use sem_test_support::upstream::{TEST_TOKEN, mock_host};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn context_with(server: &MockServer) -> AppContext {
        AppContext {
            config: ClientConfig::new(mock_host(server), TEST_TOKEN),
            output: None,
        }
    }

    fn manifest(dir: &TempDir, text: &str) -> Result<PathBuf> {
        let path = dir.path().join("manifest.yml");
        fs::write(&path, text)?;
        Ok(path)
    }

    fn validation_message(result: CliResult<()>) -> Result<String> {
        match result {
            Err(CliError::Validation(message)) => Ok(message),
            Err(CliError::Failure(err)) => Err(anyhow!("unexpected failure: {err:#}")),
            Ok(()) => Err(anyhow!("expected a validation error")),
        }
    }

    #[test]
    fn manifest_kind_dispatches_on_kind_field() -> Result<()> {
        assert_eq!(
            manifest_kind(SECRET_MANIFEST.as_bytes()).map_err(|err| anyhow!(err.display_message()))?,
            ManifestKind::Secret
        );
        assert_eq!(
            manifest_kind(JOB_MANIFEST.as_bytes()).map_err(|err| anyhow!(err.display_message()))?,
            ManifestKind::Job
        );
        let message = validation_message(manifest_kind(b"kind: Project\n").map(|_| ()))?;
        assert_eq!(message, "unsupported resource kind 'Project'");
        let message = validation_message(manifest_kind(b"metadata: {}\n").map(|_| ()))?;
        assert_eq!(message, "manifest has no 'kind' field");
        Ok(())
    }

    #[tokio::test]
    async fn create_from_secret_manifest_posts() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1beta/secrets")
                .json_body_includes(r#"{"metadata":{"name":"aws-credentials"}}"#);
            then.status(200).body("{}");
        });

        let dir = tempfile::tempdir()?;
        let path = manifest(&dir, SECRET_MANIFEST)?;
        handle_create_from_file(&context_with(&server), &path).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn create_from_job_manifest_posts_to_jobs() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/v1alpha/jobs");
            then.status(200).body("{}");
        });

        let dir = tempfile::tempdir()?;
        let path = manifest(&dir, JOB_MANIFEST)?;
        handle_create_from_file(&context_with(&server), &path).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn apply_patches_by_id() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PATCH).path("/api/v1beta/secrets/5a1f");
            then.status(200).body("{}");
        });

        let dir = tempfile::tempdir()?;
        let path = manifest(
            &dir,
            "apiVersion: v1beta\nkind: Secret\nmetadata:\n  name: db\n  id: 5a1f\n",
        )?;
        handle_apply(&context_with(&server), &path).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn unknown_manifest_field_is_rejected_before_any_request() -> Result<()> {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir()?;
        let path = manifest(&dir, "kind: Secret\nmetadata:\n  name: db\n  owner: me\n")?;
        let message =
            validation_message(handle_create_from_file(&context_with(&server), &path).await)?;
        assert!(message.contains("metadata.owner"), "{message}");
        Ok(())
    }

    #[tokio::test]
    async fn apply_refuses_jobs() -> Result<()> {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir()?;
        let path = manifest(&dir, JOB_MANIFEST)?;
        let message = validation_message(handle_apply(&context_with(&server), &path).await)?;
        assert!(message.starts_with("jobs cannot be updated"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_a_failure() -> Result<()> {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir()?;
        let err = handle_apply(&context_with(&server), &dir.path().join("absent.yml"))
            .await
            .err()
            .ok_or_else(|| anyhow!("expected failure"))?;
        assert_eq!(err.exit_code(), 3);
        Ok(())
    }
}
