use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value, json};

use super::fields::{lookup, lookup_str, scalar_to_string};
use crate::domain::{
    MessageId, PhoneNormalizer, PhoneNumber, RecipientStatus, SendSms, SendSmsResponse, SenderId,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(&'static str),
}

const ENTRY_LIST_KEYS: &[&str] = &["recipients", "messages", "results"];
const PHONE_KEYS: &[&str] = &["phone", "recipient", "number", "to"];
const MESSAGE_ID_KEYS: &[&str] = &["message_id", "messageId", "sms_id", "id"];
const REJECTED_STATUSES: &[&str] = &["failed", "rejected", "error", "invalid", "undelivered"];

pub fn encode_send_sms_body(request: &SendSms, sender_id: &SenderId) -> String {
    let recipients = request
        .recipients()
        .iter()
        .map(PhoneNumber::as_str)
        .collect::<Vec<_>>();

    json!({
        "sender_id": sender_id.as_str(),
        "recipients": recipients,
        "message": request.message().as_str(),
    })
    .to_string()
}

/// Decode a 2xx response of the send endpoint.
///
/// The provider may report recipients individually (a list under `recipients`,
/// `messages` or `results`, at the top level or under `data`). Each requested
/// recipient gets exactly one [`RecipientStatus`], in request order.
///
/// Reported phones are canonicalized with `normalizer` before matching, so local
/// (`0712345678`) and international forms both resolve. Entries that still do
/// not name a requested recipient are skipped; they remain visible in `raw`.
pub fn decode_send_sms_json_response(
    request: &SendSms,
    normalizer: &PhoneNormalizer,
    json: &str,
) -> Result<SendSmsResponse, TransportError> {
    let raw: Value = serde_json::from_str(json)?;

    let (message, entries) = match &raw {
        Value::Object(root) => (
            lookup_str(root, &["message"]).map(str::to_owned),
            entry_list(root),
        ),
        Value::Array(items) => (None, items.as_slice()),
        _ => {
            return Err(TransportError::UnexpectedShape(
                "expected JSON object or array",
            ));
        }
    };

    let requested = request.recipients().iter().collect::<HashSet<_>>();
    let mut reported = HashMap::<PhoneNumber, RecipientStatus>::new();
    for entry in entries {
        let Some(entry) = entry.as_object() else {
            continue;
        };
        let Some(key) = lookup(entry, PHONE_KEYS).and_then(scalar_to_string) else {
            continue;
        };
        let Some(phone) = match_phone_key(normalizer, &requested, &key) else {
            tracing::debug!(phone = %key, "ignoring unrequested recipient in send response");
            continue;
        };
        let status = lookup(entry, &["status"]).and_then(scalar_to_string);
        let accepted = lookup(entry, &["accepted", "success"])
            .and_then(Value::as_bool)
            .unwrap_or_else(|| !is_rejected(status.as_deref()));
        let message_id = lookup(entry, MESSAGE_ID_KEYS)
            .and_then(scalar_to_string)
            .and_then(|id| MessageId::new(id).ok());
        reported.insert(
            phone.clone(),
            RecipientStatus {
                phone,
                accepted,
                status,
                message_id,
            },
        );
    }

    let recipients = request
        .recipients()
        .iter()
        .map(|phone| {
            reported
                .get(phone)
                .cloned()
                .unwrap_or_else(|| RecipientStatus {
                    phone: phone.clone(),
                    accepted: true,
                    status: None,
                    message_id: None,
                })
        })
        .collect();

    Ok(SendSmsResponse {
        message,
        recipients,
        raw,
    })
}

fn entry_list(root: &Map<String, Value>) -> &[Value] {
    if let Some(Value::Array(items)) = root.get("data") {
        return items.as_slice();
    }
    match lookup(root, ENTRY_LIST_KEYS) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

fn is_rejected(status: Option<&str>) -> bool {
    status.is_some_and(|status| {
        let status = status.trim().to_ascii_lowercase();
        REJECTED_STATUSES.contains(&status.as_str())
    })
}

fn match_phone_key(
    normalizer: &PhoneNormalizer,
    requested: &HashSet<&PhoneNumber>,
    key: &str,
) -> Option<PhoneNumber> {
    let phone = normalizer.normalize(key).ok()?;
    requested.contains(&phone).then_some(phone)
}

#[cfg(test)]
mod tests {
    use crate::domain::{MessageText, validate_phone_numbers};

    use super::*;

    fn request(raws: &[&str]) -> SendSms {
        let phones = validate_phone_numbers(raws).unwrap();
        SendSms::new(phones, MessageText::new("hello").unwrap()).unwrap()
    }

    #[test]
    fn encode_body_uses_canonical_recipients_and_sender() {
        let req = request(&["0712345678", "+255 754 000 111"]);
        let sender = SenderId::new("NOTIFYAFRICA").unwrap();
        let body: Value = serde_json::from_str(&encode_send_sms_body(&req, &sender)).unwrap();

        assert_eq!(
            body,
            json!({
                "sender_id": "NOTIFYAFRICA",
                "recipients": ["255712345678", "255754000111"],
                "message": "hello"
            })
        );
    }

    #[test]
    fn decode_maps_reported_recipients_in_request_order() {
        let req = request(&["0712345678", "0754000111"]);
        let json = r#"
        {
          "status": 200,
          "message": "SMS sent successfully",
          "data": {
            "messages": [
              { "phone": "+255754000111", "status": "failed" },
              { "phone": "255712345678", "status": "queued", "message_id": 991 }
            ]
          }
        }
        "#;

        let resp = decode_send_sms_json_response(&req, &PhoneNormalizer::default(), json).unwrap();
        assert_eq!(resp.message.as_deref(), Some("SMS sent successfully"));
        assert_eq!(resp.recipients.len(), 2);

        let first = &resp.recipients[0];
        assert_eq!(first.phone.as_str(), "255712345678");
        assert!(first.accepted);
        assert_eq!(first.status.as_deref(), Some("queued"));
        assert_eq!(first.message_id.as_ref().map(MessageId::as_str), Some("991"));

        let second = &resp.recipients[1];
        assert_eq!(second.phone.as_str(), "255754000111");
        assert!(!second.accepted);
        assert!(!resp.all_accepted());
    }

    #[test]
    fn decode_marks_unreported_recipients_accepted() {
        let req = request(&["0712345678"]);
        let resp = decode_send_sms_json_response(&req, &PhoneNormalizer::default(), r#"{"message": "queued"}"#).unwrap();
        assert_eq!(resp.recipients.len(), 1);
        assert!(resp.recipients[0].accepted);
        assert_eq!(resp.recipients[0].status, None);
    }

    #[test]
    fn decode_accepts_top_level_array_and_explicit_flags() {
        let req = request(&["0712345678"]);
        let json = r#"[{"recipient": "255712345678", "success": false, "status": "sent"}]"#;
        let resp = decode_send_sms_json_response(&req, &PhoneNormalizer::default(), json).unwrap();
        assert!(!resp.recipients[0].accepted);
    }

    #[test]
    fn decode_matches_local_format_phone_keys() {
        let req = request(&["0712345678"]);
        let json = r#"{"data":{"messages":[{"phone":"0712345678","status":"sent"}]}}"#;
        let resp = decode_send_sms_json_response(&req, &PhoneNormalizer::default(), json).unwrap();
        assert_eq!(resp.recipients.len(), 1);
        assert_eq!(resp.recipients[0].phone.as_str(), "255712345678");
        assert_eq!(resp.recipients[0].status.as_deref(), Some("sent"));
        assert!(resp.recipients[0].accepted);
    }

    #[test]
    fn decode_skips_unrequested_and_unparsable_phone_keys() {
        let req = request(&["0712345678"]);
        let json = r#"{"recipients": [
            {"phone": "255700000000", "status": "failed"},
            {"phone": "n/a", "status": "failed"},
            {"phone": "+255 712 345 678", "status": "queued"}
        ]}"#;
        let resp = decode_send_sms_json_response(&req, &PhoneNormalizer::default(), json).unwrap();
        assert_eq!(resp.recipients.len(), 1);
        assert_eq!(resp.recipients[0].status.as_deref(), Some("queued"));
        assert!(resp.all_accepted());
        assert_eq!(resp.raw["recipients"][0]["phone"], "255700000000");
    }

    #[test]
    fn decode_rejects_invalid_json_and_scalars() {
        let req = request(&["0712345678"]);
        assert!(matches!(
            decode_send_sms_json_response(&req, &PhoneNormalizer::default(), "<html>"),
            Err(TransportError::Json(_))
        ));
        assert!(matches!(
            decode_send_sms_json_response(&req, &PhoneNormalizer::default(), "42"),
            Err(TransportError::UnexpectedShape(_))
        ));
    }
}
