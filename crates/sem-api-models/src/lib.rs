#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Typed resource models for the Semaphore public API.
//!
//! Every resource kind (secrets, jobs, ...) implements [`Resource`], which
//! carries the capability set the generic client needs: kind name, plural
//! path segment, API version, payload codec and validation rule. The CLI and
//! the HTTP client share these types so the wire contract lives in one place.
//!
//! Layout: `resource.rs` (traits + codecs), `meta.rs` (shared metadata),
//! `secret.rs`, `job.rs`, `strict.rs` (unknown-field detection for manifests),
//! `timestamp.rs` (string-encoded Unix timestamps), `error.rs`.

pub mod error;
pub mod job;
pub mod meta;
pub mod resource;
pub mod secret;
mod strict;
mod timestamp;

pub use error::{ModelError, ModelResult};
pub use job::{
    Job, JobAgent, JobFile, JobList, JobMeta, JobPort, JobSecret, JobSpec, JobState, JobStatus,
    JobStatusAgent, Machine,
};
pub use meta::ObjectMeta;
pub use resource::{Resource, ResourceList};
pub use secret::{EnvVar, Secret, SecretData, SecretFile, SecretList};
