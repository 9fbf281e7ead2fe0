use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, PhoneNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One message sent to one or more recipients.
///
/// Recipients keep the caller's order; duplicates are not removed.
pub struct SendSms {
    recipients: Vec<PhoneNumber>,
    message: MessageText,
}

impl SendSms {
    /// Build a send request. At least one recipient is required.
    pub fn new(recipients: Vec<PhoneNumber>, message: MessageText) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            });
        }
        Ok(Self {
            recipients,
            message,
        })
    }

    pub fn recipients(&self) -> &[PhoneNumber] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }
}
