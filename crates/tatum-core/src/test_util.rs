//! Shared test helpers for `tatum-core` unit tests.

use std::sync::Arc;

use crate::client::TatumClient;
use crate::transport::mock::MockTransport;
use crate::types::TokenAmount;

/// Wrap `mock` in a client, keeping a handle to inspect recorded requests.
pub fn client_with(mock: MockTransport) -> (Arc<MockTransport>, TatumClient) {
    let mock = Arc::new(mock);
    let client = TatumClient::new(mock.clone());
    (mock, client)
}

/// Parse a decimal literal known to be valid.
pub fn amount(text: &str) -> TokenAmount {
    text.parse().expect("test amount must parse")
}
