//! Native HTTP transport for the Tatum REST API.
//!
//! Implements [`TatumTransport`](super::TatumTransport) on top of `reqwest`,
//! with API-key signing, credit accounting and optional request rate
//! limiting.

mod client;
mod connection;
mod protocol;

pub use client::HttpTransport;
pub use connection::{TransportConfig, API_KEY_ENV, DEFAULT_BASE_URL};
