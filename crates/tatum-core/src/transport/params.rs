use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Key/value parameter set for a single request.
///
/// Absent optional values are never stored, so they never reach the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parameter set from a request record. The record must
    /// serialize to a JSON object; `None` fields skipped by serde are
    /// absent here too.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, CoreError> {
        match to_value(record)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::InvalidArgument(format!(
                "request parameters must be an object, got {other}"
            ))),
        }
    }

    pub fn insert<T: Serialize>(&mut self, key: &str, value: T) -> Result<&mut Self, CoreError> {
        let value = to_value(&value)?;
        self.0.insert(key.to_owned(), value);
        Ok(self)
    }

    pub fn insert_optional<T: Serialize>(
        &mut self,
        key: &str,
        value: Option<T>,
    ) -> Result<&mut Self, CoreError> {
        match value {
            Some(value) => self.insert(key, value),
            None => Ok(self),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Flatten into `(key, value)` pairs for a query string. Strings are
    /// passed through unquoted, every other value uses its JSON text.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, CoreError> {
    serde_json::to_value(value)
        .map_err(|e| CoreError::InvalidArgument(format!("unserializable parameter: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Record {
        sender_account_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payment_id: Option<String>,
    }

    #[test]
    fn optional_none_is_omitted() {
        let mut params = Params::new();
        params
            .insert("txData", "00ff")
            .unwrap()
            .insert_optional::<&str>("signatureId", None)
            .unwrap();
        assert!(params.contains("txData"));
        assert!(!params.contains("signatureId"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn from_record_respects_skipped_fields() {
        let params = Params::from_record(&Record {
            sender_account_id: "acc-1".into(),
            payment_id: None,
        })
        .unwrap();
        assert_eq!(params.get("senderAccountId"), Some(&Value::from("acc-1")));
        assert!(!params.contains("paymentId"));
    }

    #[test]
    fn from_record_rejects_non_objects() {
        let err = Params::from_record(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn query_pairs_render_scalars_without_quotes() {
        let mut params = Params::new();
        params
            .insert("pageSize", 50)
            .unwrap()
            .insert("mnemonic", "urge pulp usage")
            .unwrap();
        let mut pairs = params.to_query_pairs();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("mnemonic".to_owned(), "urge pulp usage".to_owned()),
                ("pageSize".to_owned(), "50".to_owned()),
            ]
        );
    }
}
