//! Typed Rust client for the Notify Africa SMS HTTP API.
//!
//! The crate is split into a domain layer of strong types (phone-number
//! normalization, credentials, requests and responses), a transport layer for
//! JSON wire-format quirks, and a small client layer orchestrating requests and
//! mapping HTTP outcomes to [`NotifyAfricaError`].
//!
//! Phone numbers are canonicalized for Tanzania before anything is sent:
//! `0712345678`, `+255 712 345 678` and `255712345678` all become
//! `255712345678`.
//!
//! ```rust,no_run
//! use notify_africa::NotifyAfricaClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), notify_africa::NotifyAfricaError> {
//!     let client = NotifyAfricaClient::new("api-key", "NOTIFYAFRICA")?;
//!     let response = client.send_sms(["0712345678"], "Habari!").await?;
//!     assert!(response.all_accepted());
//!
//!     let balance = client.get_balance().await?;
//!     println!("credits left: {}", balance.balance.as_f64());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ConfigurationError, ErrorKind, NetworkError, NotifyAfricaClient, NotifyAfricaClientBuilder,
    NotifyAfricaError,
};
pub use domain::{
    ApiKey, BalanceResponse, CreditBalance, MessageId, MessageStatusResponse, MessageText,
    PhoneNormalizer, PhoneNumber, ProfileResponse, RecipientStatus, Region, SendSms,
    SendSmsResponse, SenderId, ValidationError, normalize_phone_number, validate_phone_numbers,
};
