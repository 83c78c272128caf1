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

//! HTTP client for the Semaphore public API.
//!
//! Layout:
//! - `transport.rs`: `BaseClient`, verb-shaped requests returning raw status + body
//! - `api.rs`: `ResourceApi<R>`, status policy and typed decoding per resource kind
//! - `error.rs`: connection / upstream / local-shape error classes

pub mod api;
pub mod error;
pub mod transport;

pub use api::ResourceApi;
pub use error::{ClientError, ClientResult};
pub use transport::{BaseClient, HEADER_REQUEST_ID, HEADER_USER_ID, RawResponse};
