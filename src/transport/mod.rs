//! Transport layer: wire-format details (JSON encoding/decoding).

mod account;
mod credit;
mod fields;
mod send_sms;

pub use account::{
    decode_balance_json_response, decode_message_status_json_response,
    decode_profile_json_response,
};
pub use send_sms::{decode_send_sms_json_response, encode_send_sms_body};
