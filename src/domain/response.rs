use serde_json::{Map, Value};

use crate::domain::value::{MessageId, PhoneNumber};

#[derive(Debug, Clone, PartialEq)]
pub struct SendSmsResponse {
    pub message: Option<String>,
    pub recipients: Vec<RecipientStatus>,
    pub raw: Value,
}

impl SendSmsResponse {
    /// Returns `true` when every recipient was accepted by the provider.
    pub fn all_accepted(&self) -> bool {
        self.recipients.iter().all(|it| it.accepted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Acceptance state of a single recipient of a send request.
///
/// Recipients the provider did not report individually inherit the acceptance
/// of the whole request.
pub struct RecipientStatus {
    pub phone: PhoneNumber,
    pub accepted: bool,
    pub status: Option<String>,
    pub message_id: Option<MessageId>,
}

#[derive(Debug, Clone, PartialEq)]
/// Account profile as returned by the provider.
pub struct ProfileResponse {
    pub data: Map<String, Value>,
}

impl ProfileResponse {
    /// Look up a field, first at the top level and then under `data`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key).or_else(|| {
            self.data
                .get("data")
                .and_then(Value::as_object)
                .and_then(|inner| inner.get(key))
        })
    }

    /// String field lookup, see [`ProfileResponse::get`].
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceResponse {
    pub balance: CreditBalance,
    pub raw: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
/// Credit balance reported by the provider.
///
/// The textual token is preserved as received (`10.50` stays `"10.50"`).
pub struct CreditBalance {
    raw: String,
    value: f64,
}

impl CreditBalance {
    pub(crate) fn parse(raw: String) -> Option<Self> {
        let value = raw.trim().parse::<f64>().ok().filter(|it| it.is_finite())?;
        Some(Self { raw, value })
    }

    pub fn as_f64(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageStatusResponse {
    pub message_id: MessageId,
    pub status: Option<String>,
    pub raw: Value,
}
