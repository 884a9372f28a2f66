use std::time::Duration;

use reqwest::Url;

use crate::error::CoreError;
use crate::transport::check_segment;

/// Production endpoint of the Tatum v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api-eu1.tatum.io/v3/";

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "TATUM_API_KEY";

/// Settings for [`HttpTransport`](super::HttpTransport).
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    /// Explicit API key. Falls back to `TATUM_API_KEY` when `None`.
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Outbound request cap; `None` disables throttling.
    pub requests_per_second: Option<u32>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            requests_per_second: None,
        }
    }
}

impl TransportConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

pub(super) fn resolve_api_key(
    explicit: Option<&str>,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, CoreError> {
    let key = match explicit {
        Some(key) => key.to_owned(),
        None => env_lookup(API_KEY_ENV).ok_or_else(|| {
            CoreError::Config(format!("no API key configured and {API_KEY_ENV} is not set"))
        })?,
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(CoreError::Config("API key must not be empty".to_owned()));
    }
    Ok(key.to_owned())
}

pub(super) fn parse_base_url(base_url: &str) -> Result<Url, CoreError> {
    let mut parsed = Url::parse(base_url).map_err(|e| {
        CoreError::Config(format!(
            "invalid base URL `{base_url}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(CoreError::Config(format!(
                "unsupported base URL scheme `{other}`; expected http or https"
            )))
        }
    }
    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    Ok(parsed)
}

/// Append raw path segments to the base URL. Each segment is
/// percent-encoded on its own, so a `/` inside one becomes `%2F`.
pub(super) fn endpoint_url(base: &Url, segments: &[String]) -> Result<Url, CoreError> {
    for segment in segments {
        check_segment(segment)?;
    }
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CoreError::Config(format!("base URL `{base}` cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
