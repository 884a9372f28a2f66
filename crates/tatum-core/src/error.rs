/// Failures raised while talking to the Tatum API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Tatum API error (status {status}{}): {message}", suffix(", ", .error_code))]
    Server {
        status: u16,
        error_code: Option<String>,
        message: String,
    },

    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("API communication failure: {0}")]
    Api(#[from] ApiError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("transaction failed{}", suffix(": ", .tx_id))]
    TransactionFailed { tx_id: Option<String> },

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn suffix(sep: &str, value: &Option<String>) -> String {
    value
        .as_deref()
        .map(|v| format!("{sep}{v}"))
        .unwrap_or_default()
}

impl CoreError {
    /// HTTP status of a server-side rejection, if this error is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(ApiError::Server { status, .. }) => Some(*status),
            Self::Api(ApiError::Transport(err)) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_message_includes_code() {
        let err = CoreError::from(ApiError::Server {
            status: 403,
            error_code: Some("subscription.not.active".into()),
            message: "Subscription not active".into(),
        });
        let text = err.to_string();
        assert!(text.contains("status 403, subscription.not.active"));
        assert!(text.contains("Subscription not active"));
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn transaction_failed_without_id() {
        let err = CoreError::TransactionFailed { tx_id: None };
        assert_eq!(err.to_string(), "transaction failed");
        assert_eq!(err.status(), None);
    }
}
