use serde_json::Value;

use crate::error::ApiError;

/// Error body returned by Tatum for non-2xx responses.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TatumErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Map a rejected response into an [`ApiError::Server`].
///
/// Well-formed Tatum error bodies contribute their `errorCode` and
/// `message` (with any `data` details appended); anything else keeps the
/// raw body text as the message.
pub(super) fn parse_error_body(status: u16, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<TatumErrorBody>(body)
        .ok()
        .filter(|b| b.error_code.is_some() || b.message.is_some());

    match parsed {
        Some(b) => {
            let mut message = b.message.unwrap_or_default();
            if let Some(details) = b.data.as_ref().and_then(render_details) {
                message = format!("{message} ({details})");
            }
            ApiError::Server {
                status,
                error_code: b.error_code,
                message,
            }
        }
        None => ApiError::Server {
            status,
            error_code: None,
            message: body.trim().to_owned(),
        },
    }
}

fn render_details(data: &Value) -> Option<String> {
    let items = data.as_array()?;
    let rendered: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    (!rendered.is_empty()).then(|| rendered.join("; "))
}

/// Decode a 2xx body. Empty bodies become `Null`; non-JSON text (some
/// endpoints answer with a bare string) is kept as a JSON string.
pub(super) fn decode_success_body(body: &str) -> Value {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tatum_error_body_is_structured() {
        let body = r#"{"statusCode":400,"errorCode":"validation.failed","message":"Request validation failed.","data":["amount must be a number string"]}"#;
        match parse_error_body(400, body) {
            ApiError::Server {
                status,
                error_code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(error_code.as_deref(), Some("validation.failed"));
                assert_eq!(
                    message,
                    "Request validation failed. (amount must be a number string)"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unstructured_error_body_kept_verbatim() {
        match parse_error_body(502, "Bad Gateway\n") {
            ApiError::Server {
                error_code,
                message,
                ..
            } => {
                assert!(error_code.is_none());
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_body_variants() {
        assert_eq!(decode_success_body(""), Value::Null);
        assert_eq!(decode_success_body("  \n"), Value::Null);
        assert_eq!(decode_success_body(r#"{"key":"x"}"#)["key"], "x");
        assert_eq!(
            decode_success_body("0000abcd"),
            Value::String("0000abcd".into())
        );
        assert_eq!(
            decode_success_body(r#""0000abcd""#),
            Value::String("0000abcd".into())
        );
    }
}
