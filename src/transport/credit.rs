use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::domain::CreditBalance;

/// Credit count as sent on the wire: `1250`, `1250.50` or `"1250.50"`.
///
/// Numbers keep their exact JSON token so `as_str` on the resulting
/// [`CreditBalance`] shows what the provider sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditToken {
    token: String,
}

impl CreditToken {
    /// `None` when the token is not a finite number (e.g. `"unlimited"`).
    pub fn into_balance(self) -> Option<CreditBalance> {
        CreditBalance::parse(self.token)
    }
}

impl<'de> Deserialize<'de> for CreditToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = <Box<RawValue>>::deserialize(deserializer)?;
        let text = raw.get();
        let token = if text.starts_with('"') {
            serde_json::from_str::<String>(text).map_err(D::Error::custom)?
        } else if text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
            text.to_owned()
        } else {
            return Err(D::Error::custom(format!(
                "credit count must be a number or numeric string, got `{text}`"
            )));
        };
        Ok(Self { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credits(json: &str) -> Result<CreditToken, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn numeric_credit_keeps_its_trailing_zeros() {
        let balance = credits("10.00").unwrap().into_balance().unwrap();
        assert_eq!(balance.as_str(), "10.00");
        assert_eq!(balance.as_f64(), 10.0);
    }

    #[test]
    fn quoted_credit_is_unwrapped() {
        let balance = credits(r#""1500""#).unwrap().into_balance().unwrap();
        assert_eq!(balance.as_str(), "1500");
        assert_eq!(balance.as_f64(), 1500.0);
    }

    #[test]
    fn non_numeric_string_has_no_balance() {
        assert!(credits(r#""unlimited""#).unwrap().into_balance().is_none());
    }

    #[test]
    fn booleans_and_arrays_are_rejected() {
        assert!(credits("true").is_err());
        assert!(credits("[1]").is_err());
    }
}
