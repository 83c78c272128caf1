//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use chrono::{DateTime, TimeDelta, Utc};
use sem_api_models::{Job, Resource, Secret};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn render_secret_list(secrets: &[Secret], format: OutputFormat) -> CliResult<()> {
    let text = match format {
        OutputFormat::Table => secret_table(secrets, Utc::now()),
        other => encode(secrets, other)?,
    };
    print!("{text}");
    Ok(())
}

pub(crate) fn render_secret(secret: &Secret, format: OutputFormat) -> CliResult<()> {
    let text = match format {
        OutputFormat::Table => secret_table(std::slice::from_ref(secret), Utc::now()),
        other => encode_resource(secret, other)?,
    };
    print!("{text}");
    Ok(())
}

pub(crate) fn render_job_list(jobs: &[Job], format: OutputFormat) -> CliResult<()> {
    let text = match format {
        OutputFormat::Table => job_table(jobs),
        other => encode(jobs, other)?,
    };
    print!("{text}");
    Ok(())
}

pub(crate) fn render_job(job: &Job, format: OutputFormat) -> CliResult<()> {
    let text = match format {
        OutputFormat::Table => job_table(std::slice::from_ref(job)),
        other => encode_resource(job, other)?,
    };
    print!("{text}");
    Ok(())
}

pub(crate) fn secret_table(secrets: &[Secret], now: DateTime<Utc>) -> String {
    let mut out = format!("{:<40} AGE\n", "NAME");
    for secret in secrets {
        let age = format_age(secret.metadata.create_time, now);
        out.push_str(&format!("{:<40} {age}\n", secret.name()));
    }
    out
}

pub(crate) fn job_table(jobs: &[Job]) -> String {
    let mut out = format!("{:<36} {:<32} {:<10} RESULT\n", "ID", "NAME", "STATE");
    for job in jobs {
        out.push_str(&format!(
            "{:<36} {:<32} {:<10} {}\n",
            job.identifier(),
            job.name(),
            or_dash(&job.status.state),
            or_dash(&job.status.result)
        ));
    }
    out
}

/// Compact age such as `42s`, `5m`, `3h` or `12d`; `-` when unknown.
pub(crate) fn format_age(created: Option<i64>, now: DateTime<Utc>) -> String {
    let Some(created) = created.and_then(|secs| DateTime::from_timestamp(secs, 0)) else {
        return "-".to_string();
    };
    let elapsed = now
        .signed_duration_since(created)
        .max(TimeDelta::zero());
    if elapsed.num_days() > 0 {
        format!("{}d", elapsed.num_days())
    } else if elapsed.num_hours() > 0 {
        format!("{}h", elapsed.num_hours())
    } else if elapsed.num_minutes() > 0 {
        format!("{}m", elapsed.num_minutes())
    } else {
        format!("{}s", elapsed.num_seconds())
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn encode_resource<R: Resource>(resource: &R, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Yaml => resource.to_yaml().map_err(CliError::from),
        _ => encode(resource, format),
    }
}

fn encode<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|err| CliError::failure(anyhow!("failed to format YAML: {err}"))),
        _ => serde_json::to_string_pretty(value)
            .map(|text| text + "\n")
            .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sem_api_models::JobState;

    fn at(secs: i64) -> anyhow::Result<DateTime<Utc>> {
        DateTime::from_timestamp(secs, 0).ok_or_else(|| anyhow!("timestamp out of range"))
    }

    #[test]
    fn format_age_picks_largest_unit() -> anyhow::Result<()> {
        let now = at(1_700_100_000)?;
        assert_eq!(format_age(Some(1_700_099_958), now), "42s");
        assert_eq!(format_age(Some(1_700_099_700), now), "5m");
        assert_eq!(format_age(Some(1_700_089_200), now), "3h");
        assert_eq!(format_age(Some(1_699_000_000), now), "12d");
        assert_eq!(format_age(None, now), "-");
        assert_eq!(format_age(Some(1_800_000_000), now), "0s");
        Ok(())
    }

    #[test]
    fn secret_table_lists_names_with_age() -> anyhow::Result<()> {
        let mut secret = Secret::named("db-password");
        secret.metadata.create_time = Some(1_700_000_000);
        let table = secret_table(&[secret, Secret::named("fresh")], at(1_700_003_600)?);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[0].ends_with("AGE"));
        assert!(lines[1].starts_with("db-password"));
        assert!(lines[1].ends_with("1h"));
        assert!(lines[2].ends_with('-'));
        Ok(())
    }

    #[test]
    fn job_table_uses_id_and_dashes_for_blanks() {
        let mut job = Job::named("build");
        job.metadata.id = Some("7f3b".to_string());
        job.status.state = JobState::Running.to_string();
        let table = job_table(&[job]);
        let row = table.lines().nth(1).unwrap_or_default();
        let columns: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(columns, ["7f3b", "build", "RUNNING", "-"]);
    }

    #[test]
    fn single_resources_encode_as_yaml_or_json() -> anyhow::Result<()> {
        let secret = Secret::named("db-password");
        let yaml = encode_resource(&secret, OutputFormat::Yaml)
            .map_err(|err| anyhow!(err.display_message()))?;
        assert!(yaml.contains("kind: Secret"));
        let json = encode_resource(&secret, OutputFormat::Json)
            .map_err(|err| anyhow!(err.display_message()))?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["metadata"]["name"], "db-password");
        Ok(())
    }
}
