use serde::Deserialize;
use serde_json::{Map, Value};

use super::fields::lookup_str;
use super::credit::CreditToken;
use crate::domain::{
    BalanceResponse, MessageId, MessageStatusResponse, ProfileResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(&'static str),

    #[error("response is missing a numeric `{field}` value")]
    MissingField { field: &'static str },
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceJsonFields {
    #[serde(default)]
    balance: Option<CreditToken>,
    #[serde(default)]
    credits: Option<CreditToken>,
    #[serde(default)]
    sms_balance: Option<CreditToken>,
}

impl BalanceJsonFields {
    fn first(self) -> Option<CreditToken> {
        self.balance.or(self.credits).or(self.sms_balance)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceJsonResponse {
    #[serde(default)]
    balance: Option<CreditToken>,
    #[serde(default)]
    credits: Option<CreditToken>,
    #[serde(default)]
    sms_balance: Option<CreditToken>,
    #[serde(default)]
    data: Option<BalanceJsonFields>,
}

fn decode_object(json: &str) -> Result<Map<String, Value>, TransportError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        _ => Err(TransportError::UnexpectedShape("expected JSON object")),
    }
}

pub fn decode_profile_json_response(json: &str) -> Result<ProfileResponse, TransportError> {
    Ok(ProfileResponse {
        data: decode_object(json)?,
    })
}

/// Decode a balance response; the credit value is taken from `balance`,
/// `credits` or `sms_balance`, at the top level first and then under `data`.
pub fn decode_balance_json_response(json: &str) -> Result<BalanceResponse, TransportError> {
    let raw = decode_object(json)?;
    let parsed: BalanceJsonResponse = serde_json::from_str(json)?;

    let top_level = BalanceJsonFields {
        balance: parsed.balance,
        credits: parsed.credits,
        sms_balance: parsed.sms_balance,
    };
    let balance = top_level
        .first()
        .or_else(|| parsed.data.and_then(BalanceJsonFields::first))
        .and_then(CreditToken::into_balance)
        .ok_or(TransportError::MissingField { field: "balance" })?;

    Ok(BalanceResponse { balance, raw })
}

pub fn decode_message_status_json_response(
    message_id: &MessageId,
    json: &str,
) -> Result<MessageStatusResponse, TransportError> {
    let root = decode_object(json)?;
    let status = lookup_str(&root, &["status", "delivery_status"]).map(str::to_owned);

    Ok(MessageStatusResponse {
        message_id: message_id.clone(),
        status,
        raw: Value::Object(root),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_profile_keeps_every_field() {
        let json = r#"
        {
          "status": 200,
          "data": { "name": "Acme Ltd", "sender_ids": ["ACME"] }
        }
        "#;

        let parsed = decode_profile_json_response(json).unwrap();
        assert_eq!(parsed.get_str("name"), Some("Acme Ltd"));
        assert_eq!(parsed.data.len(), 2);
    }

    #[test]
    fn decode_profile_requires_an_object() {
        assert!(matches!(
            decode_profile_json_response("[1, 2]"),
            Err(TransportError::UnexpectedShape(_))
        ));
        assert!(matches!(
            decode_profile_json_response("not json"),
            Err(TransportError::Json(_))
        ));
    }

    #[test]
    fn decode_balance_supports_numeric_and_string_credits() {
        let parsed = decode_balance_json_response(r#"{"balance": 1500.00}"#).unwrap();
        assert_eq!(parsed.balance.as_str(), "1500.00");
        assert_eq!(parsed.balance.as_f64(), 1500.0);

        let parsed = decode_balance_json_response(r#"{"balance": "250"}"#).unwrap();
        assert_eq!(parsed.balance.as_f64(), 250.0);
    }

    #[test]
    fn decode_balance_looks_under_data_and_alternate_keys() {
        let json = r#"{"status": 200, "data": {"credits": 42}}"#;
        let parsed = decode_balance_json_response(json).unwrap();
        assert_eq!(parsed.balance.as_f64(), 42.0);
        assert!(parsed.raw.contains_key("status"));

        let json = r#"{"sms_balance": "7.5"}"#;
        let parsed = decode_balance_json_response(json).unwrap();
        assert_eq!(parsed.balance.as_f64(), 7.5);
    }

    #[test]
    fn decode_balance_without_numeric_value_fails() {
        assert!(matches!(
            decode_balance_json_response(r#"{"status": 200}"#),
            Err(TransportError::MissingField { field: "balance" })
        ));
        assert!(matches!(
            decode_balance_json_response(r#"{"balance": "unlimited"}"#),
            Err(TransportError::MissingField { .. })
        ));
        assert!(matches!(
            decode_balance_json_response(r#"{"balance": true}"#),
            Err(TransportError::Json(_))
        ));
    }

    #[test]
    fn decode_message_status_reads_nested_status() {
        let id = MessageId::new("991").unwrap();
        let json = r#"{"status": 200, "data": {"status": "delivered"}}"#;
        let parsed = decode_message_status_json_response(&id, json).unwrap();
        assert_eq!(parsed.message_id, id);
        assert_eq!(parsed.status.as_deref(), Some("delivered"));
    }
}
