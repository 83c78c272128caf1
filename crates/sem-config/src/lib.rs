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

//! File- and environment-backed connection settings for the `sem` client.
//!
//! Layout: `model.rs` (config file + resolved `ClientConfig`), `loader.rs`
//! (path resolution, precedence, persistence), `validate.rs` (field checks),
//! `defaults.rs` (file names, env keys, timeouts), `error.rs`.

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, ConfigOverrides, EnvSource};
pub use model::{ClientConfig, ContextAuth, ContextEntry, SemConfigFile};
