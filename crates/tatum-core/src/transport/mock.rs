use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ApiError, CoreError};

use super::{ApiRequest, HttpMethod, TatumTransport};

type Canned = Result<serde_json::Value, (u16, String)>;

/// A mock transport for testing. Serves canned responses keyed by method and
/// path, records every request it receives, and accounts credits the way
/// the HTTP transport does.
pub struct MockTransport {
    responses: HashMap<(HttpMethod, String), Canned>,
    requests: Mutex<Vec<ApiRequest>>,
    credits: Mutex<u64>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            responses: HashMap::new(),
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    /// The single request received; panics if there was not exactly one.
    pub fn only_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().expect("length checked above")
    }
}

pub struct MockTransportBuilder {
    responses: HashMap<(HttpMethod, String), Canned>,
}

impl MockTransportBuilder {
    pub fn with_response(
        mut self,
        method: HttpMethod,
        path: &str,
        body: serde_json::Value,
    ) -> Self {
        self.responses.insert((method, path.to_owned()), Ok(body));
        self
    }

    pub fn with_error(
        mut self,
        method: HttpMethod,
        path: &str,
        status: u16,
        message: &str,
    ) -> Self {
        self.responses
            .insert((method, path.to_owned()), Err((status, message.to_owned())));
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            responses: self.responses,
            requests: Mutex::new(Vec::new()),
            credits: Mutex::new(0),
        }
    }
}

#[async_trait]
impl TatumTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, CoreError> {
        let key = (request.method, request.path());
        let credits = request.credits;
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        match self.responses.get(&key) {
            Some(Ok(body)) => {
                *self.credits.lock().expect("mock lock poisoned") += u64::from(credits);
                Ok(body.clone())
            }
            Some(Err((status, message))) => Err(ApiError::Server {
                status: *status,
                error_code: None,
                message: message.clone(),
            }
            .into()),
            None => Err(ApiError::Server {
                status: 404,
                error_code: None,
                message: format!("no canned response for {} {}", key.0, key.1),
            }
            .into()),
        }
    }

    fn credits_used(&self) -> u64 {
        *self.credits.lock().expect("mock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_route_is_not_found_and_free() {
        let mock = MockTransport::builder().build();
        let err = mock
            .send(ApiRequest::get("scrypta/info", 1))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(mock.credits_used(), 0);
        assert_eq!(mock.only_request().path(), "scrypta/info");
    }

    #[tokio::test]
    async fn canned_response_accounts_credits() {
        let mock = MockTransport::builder()
            .with_response(HttpMethod::Get, "scrypta/info", serde_json::json!({ "blocks": 1 }))
            .build();
        let value = mock.send(ApiRequest::get("scrypta/info", 1)).await.unwrap();
        assert_eq!(value["blocks"], 1);
        assert_eq!(mock.credits_used(), 1);
    }
}
