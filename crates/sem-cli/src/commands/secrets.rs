use std::fs;

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose};
use sem_api_models::{Resource, Secret};
use tracing::info;

use crate::cli::{CreateSecretArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_secret, render_secret_list};

pub(crate) async fn handle_secret_list(ctx: &AppContext) -> CliResult<()> {
    let secrets = ctx
        .api::<Secret>()?
        .list()
        .await
        .map_err(|err| CliError::from_client(err, "listing secrets"))?;
    render_secret_list(&secrets.secrets, ctx.format_or(OutputFormat::Table))
}

pub(crate) async fn handle_secret_get(ctx: &AppContext, name: &str) -> CliResult<()> {
    let secret = ctx
        .api::<Secret>()?
        .get(name)
        .await
        .map_err(|err| CliError::from_client(err, format!("getting Secrets/{name}")))?;
    render_secret(&secret, ctx.format_or(OutputFormat::Yaml))
}

pub(crate) async fn handle_secret_create(ctx: &AppContext, args: CreateSecretArgs) -> CliResult<()> {
    let secret = build_secret(args)?;
    ctx.api::<Secret>()?
        .create(&secret)
        .await
        .map_err(|err| CliError::from_client(err, format!("creating {}", secret.object_name())))?;
    info!(secret = secret.name(), "secret created");
    println!("{} created.", secret.object_name());
    Ok(())
}

pub(crate) async fn handle_secret_delete(ctx: &AppContext, name: &str) -> CliResult<()> {
    let label = Secret::named(name).object_name();
    ctx.api::<Secret>()?
        .delete(name)
        .await
        .map_err(|err| CliError::from_client(err, format!("deleting {label}")))?;
    info!(secret = name, "secret deleted");
    println!("{label} deleted.");
    Ok(())
}

/// Assemble a secret from `NAME=VALUE` pairs and `LOCAL:REMOTE` file mappings.
///
/// File contents are read from disk and base64 encoded.
fn build_secret(args: CreateSecretArgs) -> CliResult<Secret> {
    let mut secret = Secret::named(args.name);
    for pair in &args.env {
        let (name, value) = pair
            .split_once('=')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| {
                CliError::validation(format!(
                    "environment variable '{pair}' must be given as NAME=VALUE"
                ))
            })?;
        secret.add_env_var(name.trim(), value);
    }
    for mapping in &args.files {
        let (local, remote) = mapping
            .split_once(':')
            .filter(|(local, remote)| !local.is_empty() && !remote.is_empty())
            .ok_or_else(|| {
                CliError::validation(format!(
                    "file '{mapping}' must be given as LOCAL_PATH:REMOTE_PATH"
                ))
            })?;
        let content = fs::read(local)
            .with_context(|| format!("failed to read {local}"))
            .map_err(CliError::failure)?;
        secret.add_file(remote, general_purpose::STANDARD.encode(content));
    }
    Ok(secret)
}
