use std::error::Error as StdError;

use serde_json::Value;

use crate::domain::ValidationError;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Provider error codes (compared case-insensitively) that mark a 4xx body as a
/// credit failure. Free-text fields such as `message` are never inspected.
const CREDIT_ERROR_CODES: &[&str] = &[
    "insufficient_credits",
    "insufficient_credit",
    "insufficient_balance",
    "insufficient_funds",
    "low_balance",
    "no_credits",
];
const ERROR_CODE_KEYS: &[&str] = &["code", "error_code"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Field-less discriminant of [`NotifyAfricaError`].
pub enum ErrorKind {
    Configuration,
    Validation,
    Authentication,
    InsufficientCredits,
    ResponseFormat,
    Server,
    Network,
    Api,
}

#[derive(Debug, thiserror::Error)]
/// Reasons a client could not be constructed.
pub enum ConfigurationError {
    /// API key or sender id is empty.
    #[error("invalid credentials: {0}")]
    Credentials(#[from] ValidationError),

    #[error("invalid base URL `{url}`: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The base URL parsed, but is not an `http`/`https` URL usable as a base.
    #[error("unsupported base URL `{url}`")]
    UnsupportedBaseUrl { url: String },

    #[error("invalid endpoint path `{path}`: {source}")]
    EndpointPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] BoxError),
}

#[derive(Debug, thiserror::Error)]
/// The request never produced an HTTP response.
pub enum NetworkError {
    #[error("request timed out")]
    Timeout(#[source] BoxError),

    /// DNS, TLS, connection reset, etc.
    #[error("connection failed: {0}")]
    Connection(#[source] BoxError),
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`crate::NotifyAfricaClient`].
///
/// Every HTTP outcome other than a 2xx with a well-formed body maps to exactly
/// one variant; use [`NotifyAfricaError::kind`] to branch without matching on
/// payloads. Nothing is retried.
pub enum NotifyAfricaError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Local validation failure, or HTTP 400/404/422 ([`ValidationError::Rejected`]).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP 401 or 403.
    #[error("authentication failed (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },

    /// HTTP 402, or a 4xx whose body reports missing credits.
    #[error("insufficient credits (HTTP {status}): {body}")]
    InsufficientCredits { status: u16, body: String },

    /// 2xx response whose body is not the expected JSON.
    #[error("unexpected response format (HTTP {status}): {source}")]
    ResponseFormat {
        status: u16,
        body: String,
        #[source]
        source: BoxError,
    },

    /// HTTP 5xx.
    #[error("server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// Any other HTTP status.
    #[error("unexpected HTTP status {status}: {body}")]
    Api { status: u16, body: String },
}

impl NotifyAfricaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::InsufficientCredits { .. } => ErrorKind::InsufficientCredits,
            Self::ResponseFormat { .. } => ErrorKind::ResponseFormat,
            Self::Server { .. } => ErrorKind::Server,
            Self::Network(_) => ErrorKind::Network,
            Self::Api { .. } => ErrorKind::Api,
        }
    }

    /// HTTP status of the response that caused this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::InsufficientCredits { status, .. }
            | Self::ResponseFormat { status, .. }
            | Self::Server { status, .. }
            | Self::Api { status, .. }
            | Self::Validation(ValidationError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of the response that caused this error, if there was one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Authentication { body, .. }
            | Self::InsufficientCredits { body, .. }
            | Self::ResponseFormat { body, .. }
            | Self::Server { body, .. }
            | Self::Api { body, .. }
            | Self::Validation(ValidationError::Rejected { body, .. }) => Some(body.as_str()),
            _ => None,
        }
    }
}

/// Map a non-2xx status to its error; `None` for 2xx.
pub(crate) fn error_for_status(status: u16, body: &str) -> Option<NotifyAfricaError> {
    if (200..=299).contains(&status) {
        return None;
    }
    let body = body.to_owned();
    Some(match status {
        401 | 403 => NotifyAfricaError::Authentication { status, body },
        402 => NotifyAfricaError::InsufficientCredits { status, body },
        400..=499 if reports_insufficient_credits(&body) => {
            NotifyAfricaError::InsufficientCredits { status, body }
        }
        400 | 404 | 422 => NotifyAfricaError::Validation(ValidationError::Rejected { status, body }),
        500..=599 => NotifyAfricaError::Server { status, body },
        _ => NotifyAfricaError::Api { status, body },
    })
}

fn reports_insufficient_credits(body: &str) -> bool {
    let Ok(Value::Object(root)) = serde_json::from_str::<Value>(body) else {
        return false;
    };

    let nested = match root.get("error") {
        Some(Value::Object(inner)) => Some(inner),
        _ => None,
    };
    std::iter::once(&root)
        .chain(nested)
        .flat_map(|map| ERROR_CODE_KEYS.iter().filter_map(move |key| map.get(*key)))
        .filter_map(Value::as_str)
        .any(|code| {
            CREDIT_ERROR_CODES
                .iter()
                .any(|known| code.trim().eq_ignore_ascii_case(known))
        })
}
