//! Domain layer: strong types with validation and invariants (no I/O).

mod phone;
mod request;
mod response;
mod validation;
mod value;

pub use phone::{PhoneNormalizer, Region, normalize_phone_number, validate_phone_numbers};
pub use request::SendSms;
pub use response::{
    BalanceResponse, CreditBalance, MessageStatusResponse, ProfileResponse, RecipientStatus,
    SendSmsResponse,
};
pub use validation::ValidationError;
pub use value::{ApiKey, MessageId, MessageText, PhoneNumber, SenderId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_empty() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn sender_id_rejects_empty() {
        assert!(matches!(
            SenderId::new(""),
            Err(ValidationError::Empty {
                field: SenderId::FIELD
            })
        ));
    }

    #[test]
    fn send_sms_requires_recipients() {
        let msg = MessageText::new("hi").unwrap();
        let err = SendSms::new(Vec::new(), msg).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: PhoneNumber::FIELD
            }
        ));
    }

    #[test]
    fn send_sms_keeps_recipient_order_and_duplicates() {
        let phones = validate_phone_numbers(["0754000111", "0712345678", "0754000111"]).unwrap();
        let request = SendSms::new(phones.clone(), MessageText::new("hi").unwrap()).unwrap();
        assert_eq!(request.recipients(), phones.as_slice());
        assert_eq!(request.message().as_str(), "hi");
    }
}
