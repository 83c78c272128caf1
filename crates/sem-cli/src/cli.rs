//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sem_api_models::JobState;
use sem_config::{ConfigLoader, ConfigOverrides};
use sem_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use tracing::{debug, info};

use crate::client::{AppContext, CliError, CliResult};
use crate::commands::context::handle_context;
use crate::commands::jobs::{handle_job_get, handle_job_list};
use crate::commands::manifests::{handle_apply, handle_create_from_file};
use crate::commands::secrets::{
    handle_secret_create, handle_secret_delete, handle_secret_get, handle_secret_list,
};

/// Parses CLI arguments, executes the requested command and reports the
/// outcome. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { DEFAULT_LOG_LEVEL };
    if let Err(err) = init_logging(&LoggingConfig {
        level,
        format: LogFormat::from_name(cli.log_format.as_deref()),
    }) {
        eprintln!("warning: logging disabled: {err}");
    }

    let command = command_label(&cli.command);
    match dispatch(cli).await {
        Ok(()) => {
            debug!(command, "command completed");
            0
        }
        Err(err) => {
            let exit_code = err.exit_code();
            info!(command, exit_code, "command failed");
            eprintln!("error: {}", err.display_message());
            exit_code
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let mut loader = ConfigLoader::from_env();
    if let Some(path) = cli.config {
        loader = loader.with_path(path);
    }

    if let Command::Context(args) = cli.command {
        return handle_context(&loader, args.name.as_deref());
    }

    let overrides = ConfigOverrides {
        context: cli.context,
        host: cli.host,
        token: cli.token,
        timeout_secs: cli.timeout,
    };
    let config = loader.resolve(&overrides).map_err(CliError::from)?;
    let ctx = AppContext {
        config,
        output: cli.output,
    };

    match cli.command {
        Command::Get(get) => match get {
            GetCommand::Secrets => handle_secret_list(&ctx).await,
            GetCommand::Secret(args) => handle_secret_get(&ctx, &args.name).await,
            GetCommand::Jobs(args) => handle_job_list(&ctx, &args).await,
            GetCommand::Job(args) => handle_job_get(&ctx, &args.id).await,
        },
        Command::Create(args) => match (args.resource, args.file) {
            (Some(CreateCommand::Secret(secret)), _) => handle_secret_create(&ctx, secret).await,
            (None, Some(file)) => handle_create_from_file(&ctx, &file).await,
            (None, None) => Err(CliError::validation(
                "specify a resource to create or pass -f <file>",
            )),
        },
        Command::Apply(args) => handle_apply(&ctx, &args.file).await,
        Command::Delete(DeleteCommand::Secret(args)) => handle_secret_delete(&ctx, &args.name).await,
        Command::Context(args) => handle_context(&loader, args.name.as_deref()),
    }
}

#[derive(Parser)]
#[command(
    name = "sem",
    version,
    about = "Command-line client for the Semaphore CI/CD API"
)]
pub(crate) struct Cli {
    #[arg(long, global = true, help = "Path to the config file (default ~/.sem.yaml)")]
    pub(crate) config: Option<PathBuf>,
    #[arg(long, global = true, help = "Context to use instead of the active one")]
    pub(crate) context: Option<String>,
    #[arg(long, global = true, help = "API host, e.g. acme.semaphoreci.com")]
    pub(crate) host: Option<String>,
    #[arg(long, global = true, help = "API token")]
    pub(crate) token: Option<String>,
    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub(crate) timeout: Option<u64>,
    #[arg(
        long = "output",
        short = 'o',
        global = true,
        value_enum,
        help = "Output format (lists default to table, single resources to yaml)"
    )]
    pub(crate) output: Option<OutputFormat>,
    #[arg(long, short = 'v', global = true, help = "Log requests to stderr")]
    pub(crate) verbose: bool,
    #[arg(
        long,
        global = true,
        env = "SEM_LOG_FORMAT",
        help = "Log format on stderr: pretty or json (defaults by build profile)"
    )]
    pub(crate) log_format: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Show resources.
    #[command(subcommand)]
    Get(GetCommand),
    /// Create a resource from flags or a manifest file.
    Create(CreateArgs),
    /// Update an existing resource from a manifest file.
    Apply(ApplyArgs),
    /// Remove resources.
    #[command(subcommand)]
    Delete(DeleteCommand),
    /// List contexts, or switch the active one.
    Context(ContextArgs),
}

#[derive(Subcommand)]
pub(crate) enum GetCommand {
    /// List secrets.
    Secrets,
    /// Show one secret.
    Secret(NameArgs),
    /// List jobs, by default those running or queued.
    Jobs(JobListArgs),
    /// Show one job.
    Job(JobIdArgs),
}

#[derive(Args)]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct CreateArgs {
    #[arg(short = 'f', long = "file", help = "YAML manifest to create")]
    pub(crate) file: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) resource: Option<CreateCommand>,
}

#[derive(Subcommand)]
pub(crate) enum CreateCommand {
    /// Create a secret from environment variables and local files.
    Secret(CreateSecretArgs),
}

#[derive(Args, Default)]
pub(crate) struct CreateSecretArgs {
    #[arg(help = "Secret name")]
    pub(crate) name: String,
    #[arg(short = 'e', long = "env", help = "Environment variable as NAME=VALUE")]
    pub(crate) env: Vec<String>,
    #[arg(short = 'f', long = "file", help = "File as LOCAL_PATH:REMOTE_PATH")]
    pub(crate) files: Vec<String>,
}

#[derive(Args)]
pub(crate) struct ApplyArgs {
    #[arg(short = 'f', long = "file", help = "YAML manifest to apply")]
    pub(crate) file: PathBuf,
}

#[derive(Subcommand)]
pub(crate) enum DeleteCommand {
    /// Delete a secret.
    Secret(NameArgs),
}

#[derive(Args)]
pub(crate) struct NameArgs {
    #[arg(help = "Resource name")]
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct JobIdArgs {
    #[arg(help = "Job identifier")]
    pub(crate) id: String,
}

#[derive(Args, Default)]
pub(crate) struct JobListArgs {
    #[arg(
        long = "states",
        value_delimiter = ',',
        value_parser = parse_job_state,
        conflicts_with = "all",
        help = "Only list jobs in these states (PENDING, QUEUED, RUNNING, FINISHED)"
    )]
    pub(crate) states: Vec<JobState>,
    #[arg(long, help = "List jobs in every state")]
    pub(crate) all: bool,
}

#[derive(Args)]
pub(crate) struct ContextArgs {
    #[arg(help = "Context to make active")]
    pub(crate) name: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Yaml,
    Json,
}

fn parse_job_state(input: &str) -> Result<JobState, String> {
    input.parse().map_err(|err: sem_api_models::ModelError| err.to_string())
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Get(GetCommand::Secrets) => "get_secrets",
        Command::Get(GetCommand::Secret(_)) => "get_secret",
        Command::Get(GetCommand::Jobs(_)) => "get_jobs",
        Command::Get(GetCommand::Job(_)) => "get_job",
        Command::Create(CreateArgs {
            resource: Some(CreateCommand::Secret(_)),
            ..
        }) => "create_secret",
        Command::Create(_) => "create_file",
        Command::Apply(_) => "apply",
        Command::Delete(DeleteCommand::Secret(_)) => "delete_secret",
        Command::Context(ContextArgs { name: Some(_) }) => "context_switch",
        Command::Context(_) => "context_list",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn parses_get_jobs_with_repeated_and_delimited_states() -> Result<()> {
        let cli = Cli::try_parse_from([
            "sem", "get", "jobs", "--states", "running", "--states", "QUEUED,pending",
        ])?;
        let Command::Get(GetCommand::Jobs(args)) = cli.command else {
            anyhow::bail!("expected get jobs");
        };
        assert_eq!(
            args.states,
            [JobState::Running, JobState::Queued, JobState::Pending]
        );
        assert!(!args.all);
        Ok(())
    }

    #[test]
    fn states_conflict_with_all() {
        let parsed = Cli::try_parse_from(["sem", "get", "jobs", "--states", "RUNNING", "--all"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_job_state_is_rejected() {
        assert!(Cli::try_parse_from(["sem", "get", "jobs", "--states", "DONE"]).is_err());
    }

    #[test]
    fn create_secret_collects_env_and_files() -> Result<()> {
        let cli = Cli::try_parse_from([
            "sem", "create", "secret", "aws", "-e", "A=1", "-e", "B=2", "-f", "/tmp/c:/home/c",
        ])?;
        let Command::Create(CreateArgs {
            resource: Some(CreateCommand::Secret(args)),
            file: None,
        }) = cli.command
        else {
            anyhow::bail!("expected create secret");
        };
        assert_eq!(args.name, "aws");
        assert_eq!(args.env, ["A=1", "B=2"]);
        assert_eq!(args.files, ["/tmp/c:/home/c"]);
        Ok(())
    }

    #[test]
    fn create_from_file_and_global_flags() -> Result<()> {
        let cli = Cli::try_parse_from([
            "sem", "create", "-f", "secret.yml", "--output", "json", "--host", "h", "-v",
        ])?;
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.host.as_deref(), Some("h"));
        assert!(cli.verbose);
        assert_eq!(command_label(&cli.command), "create_file");
        Ok(())
    }

    #[test]
    fn log_format_flag_selects_json_logging() -> Result<()> {
        let cli = Cli::try_parse_from(["sem", "get", "secrets", "--log-format", "json"])?;
        assert_eq!(
            LogFormat::from_name(cli.log_format.as_deref()),
            LogFormat::Json
        );
        Ok(())
    }

    #[test]
    fn command_label_matches_variants() -> Result<()> {
        let labels = [
            (vec!["sem", "get", "secrets"], "get_secrets"),
            (vec!["sem", "get", "secret", "x"], "get_secret"),
            (vec!["sem", "get", "job", "j-1"], "get_job"),
            (vec!["sem", "apply", "-f", "x.yml"], "apply"),
            (vec!["sem", "delete", "secret", "x"], "delete_secret"),
            (vec!["sem", "context"], "context_list"),
            (vec!["sem", "context", "acme"], "context_switch"),
        ];
        for (args, expected) in labels {
            let cli = Cli::try_parse_from(args)?;
            assert_eq!(command_label(&cli.command), expected);
        }
        Ok(())
    }
}
