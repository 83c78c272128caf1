//! Job resource (`v1alpha`).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::resource::{Resource, ResourceList};
use crate::secret::EnvVar;

/// A single job run on a Semaphore agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// API version tag; defaults to `v1alpha`.
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    /// Kind tag; defaults to `Job`.
    #[serde(default)]
    pub kind: String,
    /// Identity and lifecycle timestamps.
    #[serde(default)]
    pub metadata: JobMeta,
    /// Requested execution.
    #[serde(default)]
    pub spec: JobSpec,
    /// Server-reported progress.
    #[serde(default)]
    pub status: JobStatus,
}

/// Job metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMeta {
    /// Job name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Creation time as Unix seconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp"
    )]
    pub create_time: Option<i64>,
    /// Last update time as Unix seconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp"
    )]
    pub update_time: Option<i64>,
    /// Start time as Unix seconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp"
    )]
    pub start_time: Option<i64>,
    /// Finish time as Unix seconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp"
    )]
    pub finish_time: Option<i64>,
}

/// What the job runs and where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Project the job belongs to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    /// Agent selection.
    #[serde(default)]
    pub agent: JobAgent,
    /// Shell commands, in order.
    #[serde(default)]
    pub commands: Vec<String>,
    /// Extra environment variables.
    #[serde(default)]
    pub env_vars: Vec<EnvVar>,
    /// Files injected into the job.
    #[serde(default)]
    pub files: Vec<JobFile>,
    /// Secrets attached to the job.
    #[serde(default)]
    pub secrets: Vec<JobSecret>,
}

/// Agent request for a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAgent {
    /// Machine type and image.
    #[serde(default)]
    pub machine: Machine,
}

/// Machine type and OS image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Machine type, e.g. `e1-standard-2`.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub machine_type: String,
    /// OS image, e.g. `ubuntu2004`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub os_image: String,
}

/// File injected into a job; `content` is base64 encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFile {
    /// Destination path.
    #[serde(default)]
    pub path: String,
    /// Base64-encoded content.
    #[serde(default)]
    pub content: String,
}

/// Reference to a secret by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSecret {
    /// Secret name.
    #[serde(default)]
    pub name: String,
}

/// Progress reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    /// Lifecycle state, e.g. `RUNNING`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    /// Outcome once finished, e.g. `PASSED`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub result: String,
    /// Agent running the job.
    #[serde(default)]
    pub agent: JobStatusAgent,
}

/// Agent endpoint details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusAgent {
    /// Agent IP address.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,
    /// Exposed ports.
    #[serde(default)]
    pub ports: Vec<JobPort>,
}

/// Named port exposed by the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPort {
    /// Port label, e.g. `ssh`.
    #[serde(default)]
    pub name: String,
    /// Port number.
    #[serde(default)]
    pub number: u16,
}

/// Wrapper returned by `GET /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobList {
    /// Jobs in server order.
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// Lifecycle states accepted by the `states` list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    /// Waiting for dependencies.
    Pending,
    /// Waiting for an agent.
    Queued,
    /// Executing on an agent.
    Running,
    /// Done, successfully or not.
    Finished,
}

impl JobState {
    /// Wire label used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
        }
    }
}

impl Display for JobState {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for JobState {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "QUEUED" => Ok(Self::Queued),
            "RUNNING" => Ok(Self::Running),
            "FINISHED" => Ok(Self::Finished),
            _ => Err(ModelError::InvalidJobState {
                value: value.to_string(),
            }),
        }
    }
}

impl Resource for Job {
    const KIND: &'static str = "Job";
    const API_VERSION: &'static str = "v1alpha";
    const PLURAL: &'static str = "jobs";

    type List = JobList;

    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn set_name(&mut self, name: String) {
        self.metadata.name = name;
    }

    fn id(&self) -> Option<&str> {
        self.metadata.id.as_deref()
    }

    fn type_tags_mut(&mut self) -> (&mut String, &mut String) {
        (&mut self.api_version, &mut self.kind)
    }
}

impl ResourceList for JobList {
    type Item = Job;

    fn items(&self) -> &[Job] {
        &self.jobs
    }

    fn items_mut(&mut self) -> &mut Vec<Job> {
        &mut self.jobs
    }

    fn into_items(self) -> Vec<Job> {
        self.jobs
    }
}
