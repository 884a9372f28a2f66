use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{header, Url};
use tracing::{debug, trace, warn};

use crate::error::{ApiError, CoreError};

use super::super::{ApiRequest, HttpMethod, TatumTransport};
use super::connection::{endpoint_url, parse_base_url, resolve_api_key, TransportConfig};
use super::protocol::{decode_success_body, parse_error_body};

const API_KEY_HEADER: &str = "x-api-key";

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Tatum REST transport over HTTP(S).
///
/// Signs every request with the `x-api-key` header and keeps a running
/// total of the credits billed for successful calls. Dropping the future
/// returned by [`TatumTransport::send`] cancels the in-flight request.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    limiter: Option<DirectRateLimiter>,
    credits: AtomicU64,
}

impl HttpTransport {
    /// Build a transport from `config`.
    ///
    /// The API key comes from `config.api_key`, or from `TATUM_API_KEY` in
    /// the process environment when unset. If `requests_per_second` is set,
    /// outbound requests are throttled to that rate.
    pub fn new(config: TransportConfig) -> Result<Self, CoreError> {
        let api_key = resolve_api_key(config.api_key.as_deref(), |name| std::env::var(name).ok())?;
        let base_url = parse_base_url(&config.base_url)?;

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(16)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::Config(format!("build HTTP client: {e}")))?;

        let limiter = match config.requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    CoreError::Config("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            client,
            base_url,
            api_key,
            limiter,
            credits: AtomicU64::new(0),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

#[async_trait]
impl TatumTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, CoreError> {
        let url = endpoint_url(&self.base_url, request.segments())?;
        let path = request.path();
        let ApiRequest {
            method,
            params,
            credits,
            ..
        } = request;

        self.wait_for_rate_limit().await;
        debug!(
            api.method = %method,
            api.path = %path,
            api.params = params.len(),
            api.credits = credits,
            "tatum request"
        );

        let builder = match method {
            HttpMethod::Get => {
                let builder = self.client.get(url);
                if params.is_empty() {
                    builder
                } else {
                    builder.query(&params.to_query_pairs())
                }
            }
            HttpMethod::Post => {
                let builder = self.client.post(url);
                if params.is_empty() {
                    builder
                } else {
                    builder.json(&params.into_json())
                }
            }
        };

        let response = builder
            .header(API_KEY_HEADER, &self.api_key)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(ApiError::Transport)?;
        debug!(
            api.method = %method,
            api.path = %path,
            %status,
            body_len = body.len(),
            "tatum response"
        );
        trace!(api.method = %method, api.path = %path, body = %body, "tatum response body");

        if !status.is_success() {
            let err = parse_error_body(status.as_u16(), &body);
            warn!(
                api.method = %method,
                api.path = %path,
                %status,
                error = %err,
                "tatum request rejected"
            );
            return Err(err.into());
        }

        let credits = u64::from(credits);
        let total = self.credits.fetch_add(credits, Ordering::Relaxed) + credits;
        debug!(
            api.path = %path,
            api.credits = credits,
            api.credits_total = total,
            "credits accounted"
        );

        Ok(decode_success_body(&body))
    }

    fn credits_used(&self) -> u64 {
        self.credits.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::transport::Params;

    fn transport_for(server: &MockServer) -> HttpTransport {
        HttpTransport::new(TransportConfig {
            base_url: server.url("/v3/"),
            api_key: Some("test-key".into()),
            ..TransportConfig::default()
        })
        .expect("transport must build")
    }

    #[tokio::test]
    async fn get_sends_api_key_and_query_string() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v3/scrypta/utxo/LdRQokR1i3XDtz1V6fV8e3ZmkvL6fm1a3q")
                    .header("x-api-key", "test-key")
                    .query_param("pageSize", "10")
                    .query_param("offset", "20");
                then.status(200).json_body(json!([{ "hash": "aa", "index": 0 }]));
            })
            .await;

        let transport = transport_for(&server);
        let mut params = Params::new();
        params.insert("pageSize", 10).unwrap().insert("offset", 20).unwrap();
        let value = transport
            .send(
                ApiRequest::get("scrypta/utxo/LdRQokR1i3XDtz1V6fV8e3ZmkvL6fm1a3q", 1)
                    .with_params(params),
            )
            .await
            .expect("request must succeed");

        mock.assert_async().await;
        assert_eq!(value[0]["hash"], "aa");
        assert_eq!(transport.credits_used(), 1);
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v3/scrypta/broadcast")
                    .header("x-api-key", "test-key")
                    .header("content-type", "application/json")
                    .json_body(json!({ "txData": "0200ff" }));
                then.status(200).json_body(json!({ "txId": "f00d", "failed": false }));
            })
            .await;

        let transport = transport_for(&server);
        let mut params = Params::new();
        params.insert("txData", "0200ff").unwrap();
        let value = transport
            .send(ApiRequest::post("scrypta/broadcast", 2).with_params(params))
            .await
            .expect("request must succeed");

        mock.assert_async().await;
        assert_eq!(value["txId"], "f00d");
        assert_eq!(transport.credits_used(), 2);
    }

    #[tokio::test]
    async fn error_response_maps_to_server_error_without_credits() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v3/offchain/xlm/asset");
                then.status(403).json_body(json!({
                    "statusCode": 403,
                    "errorCode": "asset.exists",
                    "message": "Asset already exists."
                }));
            })
            .await;

        let transport = transport_for(&server);
        let err = transport
            .send(ApiRequest::post("offchain/xlm/asset", 2))
            .await
            .expect_err("request must fail");

        match err {
            CoreError::Api(ApiError::Server {
                status,
                error_code,
                message,
            }) => {
                assert_eq!(status, 403);
                assert_eq!(error_code.as_deref(), Some("asset.exists"));
                assert_eq!(message, "Asset already exists.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.credits_used(), 0);
    }

    #[tokio::test]
    async fn empty_success_body_decodes_to_null() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v3/offchain/ethereum/erc20/MYT/0xabc");
                then.status(204);
            })
            .await;

        let transport = transport_for(&server);
        let request = ApiRequest::post("offchain/ethereum/erc20", 2)
            .segment("MYT")
            .and_then(|r| r.segment("0xabc"))
            .unwrap();
        let value = transport.send(request).await.expect("request must succeed");
        assert!(value.is_null());
        assert_eq!(transport.credits_used(), 2);
    }

    #[test]
    fn zero_rate_limit_is_rejected() {
        let result = HttpTransport::new(TransportConfig {
            api_key: Some("k".into()),
            requests_per_second: Some(0),
            ..TransportConfig::default()
        });
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
