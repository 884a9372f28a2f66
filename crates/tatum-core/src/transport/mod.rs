//! Tatum REST transport abstraction.
//!
//! Defines the [`TatumTransport`] trait every endpoint method forwards to,
//! the [`ApiRequest`] it consumes, and an HTTP implementation
//! ([`HttpTransport`]) plus a test double (`mock::MockTransport`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
mod params;

pub use http_adapter::{HttpTransport, TransportConfig, API_KEY_ENV, DEFAULT_BASE_URL};
pub use params::Params;

use async_trait::async_trait;

use crate::error::CoreError;

/// HTTP verbs used by the Tatum endpoints this crate covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// One call to a Tatum endpoint, relative to the API base URL.
///
/// The path is held as raw segments: a fixed route such as
/// `scrypta/transaction` plus caller values appended one segment each, so
/// a value containing `/` can never address another endpoint. For `GET`
/// the parameters travel as a query string, for `POST` as a JSON body.
/// `credits` is the endpoint's billing cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    segments: Vec<String>,
    pub params: Params,
    pub credits: u32,
}

impl ApiRequest {
    /// `route` is a fixed `/`-separated endpoint path, never caller input.
    pub fn get(route: &str, credits: u32) -> Self {
        Self::new(HttpMethod::Get, route, credits)
    }

    /// `route` is a fixed `/`-separated endpoint path, never caller input.
    pub fn post(route: &str, credits: u32) -> Self {
        Self::new(HttpMethod::Post, route, credits)
    }

    fn new(method: HttpMethod, route: &str, credits: u32) -> Self {
        Self {
            method,
            segments: route
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            params: Params::new(),
            credits,
        }
    }

    /// Append one caller-supplied path segment. The value is kept whole;
    /// the transport percent-encodes it, including any `/`.
    pub fn segment(mut self, value: impl std::fmt::Display) -> Result<Self, CoreError> {
        let value = value.to_string();
        check_segment(&value)?;
        self.segments.push(value);
        Ok(self)
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Unencoded `/`-joined path, for logs and test routing.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

/// Empty, `.` and `..` segments would be collapsed or resolved away by URL
/// normalisation, so they are rejected outright.
pub(crate) fn check_segment(value: &str) -> Result<(), CoreError> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(CoreError::InvalidArgument(format!(
            "invalid path segment `{value}`"
        )));
    }
    Ok(())
}

/// The shared transport behind every client.
///
/// Implementations attach the API key, account for credits, execute the
/// HTTP exchange and map failures. A successful response is handed back as
/// raw JSON (`Null` for an empty body); typed decoding happens in the
/// calling client.
#[async_trait]
pub trait TatumTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, CoreError>;

    /// Total credits consumed by successful requests so far.
    fn credits_used(&self) -> u64;
}
