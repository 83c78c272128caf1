use sem_api_models::{Job, JobState};

use crate::cli::{JobListArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{render_job, render_job_list};

/// States listed when no filter is given.
const DEFAULT_STATES: [JobState; 2] = [JobState::Running, JobState::Queued];

pub(crate) async fn handle_job_list(ctx: &AppContext, args: &JobListArgs) -> CliResult<()> {
    let states = requested_states(args);
    let jobs = ctx
        .api::<Job>()?
        .list_by_states(states)
        .await
        .map_err(|err| CliError::from_client(err, "listing jobs"))?;
    render_job_list(&jobs.jobs, ctx.format_or(OutputFormat::Table))
}

pub(crate) async fn handle_job_get(ctx: &AppContext, id: &str) -> CliResult<()> {
    let job = ctx
        .api::<Job>()?
        .get(id)
        .await
        .map_err(|err| CliError::from_client(err, format!("getting Jobs/{id}")))?;
    render_job(&job, ctx.format_or(OutputFormat::Yaml))
}

fn requested_states(args: &JobListArgs) -> &[JobState] {
    if args.all {
        &[]
    } else if args.states.is_empty() {
        &DEFAULT_STATES
    } else {
        &args.states
    }
}
