//! # tomon-rest
//!
//! JSON-over-HTTP access to the Tomon REST API.
//!
//! [`RestClient`] owns the HTTP connection pool, the base URL, and (after
//! login) the bearer token. Endpoints are grouped by resource under
//! [`endpoints`] as `impl RestClient` blocks.

mod client;
pub mod endpoints;
mod error;

pub use client::RestClient;
pub use endpoints::{AttachmentFile, LoginResponse};
pub use error::{RestError, RestResult};

#[cfg(test)]
pub(crate) mod test_support;
