//! Command handlers grouped by resource.

pub(crate) mod context;
pub(crate) mod jobs;
pub(crate) mod manifests;
pub(crate) mod secrets;
