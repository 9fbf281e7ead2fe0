use phonenumber::country;

use crate::domain::validation::ValidationError;
use crate::domain::value::PhoneNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Numbering rules of the country recipients are normalized for.
pub struct Region {
    /// Country identifier in `phonenumber` metadata (used by strict validation).
    pub country: country::Id,
    /// Country calling code without `+`.
    pub calling_code: &'static str,
    /// Prefix of local-format numbers, replaced by the calling code.
    pub trunk_prefix: &'static str,
    /// Digit count of the canonical form, calling code included.
    pub canonical_len: usize,
}

impl Region {
    /// Tanzania: `0712345678` becomes `255712345678`.
    pub const TANZANIA: Region = Region {
        country: country::Id::TZ,
        calling_code: "255",
        trunk_prefix: "0",
        canonical_len: 12,
    };
}

impl Default for Region {
    fn default() -> Self {
        Self::TANZANIA
    }
}

#[derive(Debug, Clone, Default)]
/// Canonicalizes raw phone numbers into [`PhoneNumber`] for a single [`Region`].
///
/// Accepted inputs are local numbers starting with the trunk prefix and
/// international numbers starting with the calling code, with or without `+`.
/// Whitespace and ASCII punctuation (`-`, `.`, `(`, `)`, `/`, `,`, `_`, `#`, ...)
/// are ignored. A `+` is only accepted as the first character. Letters and any
/// other non-ASCII character reject the input.
pub struct PhoneNormalizer {
    region: Region,
    strict: bool,
}

impl PhoneNormalizer {
    /// Create a normalizer for `region`.
    pub fn new(region: Region) -> Self {
        Self {
            region,
            strict: false,
        }
    }

    /// Additionally reject numbers that libphonenumber metadata considers invalid
    /// for the region (unassigned ranges, wrong number type, etc).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Region this normalizer canonicalizes for.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Normalize one raw phone number.
    ///
    /// Normalizing an already canonical value returns it unchanged.
    pub fn normalize(&self, raw: &str) -> Result<PhoneNumber, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            });
        }
        let invalid = || ValidationError::InvalidPhoneNumber {
            input: trimmed.to_owned(),
        };

        let mut digits = String::with_capacity(trimmed.len());
        let mut international = false;
        for (idx, ch) in trimmed.char_indices() {
            match ch {
                '0'..='9' => digits.push(ch),
                '+' if idx == 0 => international = true,
                '+' => return Err(invalid()),
                c if c.is_whitespace() || c.is_ascii_punctuation() => {}
                _ => return Err(invalid()),
            }
        }

        let region = &self.region;
        let canonical = if international {
            if !digits.starts_with(region.calling_code) {
                return Err(invalid());
            }
            digits
        } else if let Some(national) = digits.strip_prefix(region.trunk_prefix) {
            format!("{}{national}", region.calling_code)
        } else if digits.starts_with(region.calling_code) {
            digits
        } else {
            return Err(invalid());
        };

        if canonical.len() != region.canonical_len {
            return Err(invalid());
        }
        if self.strict && !self.is_valid_for_region(&canonical) {
            return Err(invalid());
        }

        Ok(PhoneNumber::from_canonical(canonical))
    }

    /// Normalize every input in order, stopping at the first invalid one.
    ///
    /// The error names the offending raw input. An empty input sequence is
    /// rejected as well.
    pub fn validate_many<I, S>(&self, raws: I) -> Result<Vec<PhoneNumber>, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phones = raws
            .into_iter()
            .map(|raw| self.normalize(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if phones.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            });
        }
        Ok(phones)
    }

    fn is_valid_for_region(&self, canonical: &str) -> bool {
        match phonenumber::parse(Some(self.region.country), format!("+{canonical}")) {
            Ok(parsed) => {
                parsed.code().value().to_string() == self.region.calling_code
                    && phonenumber::is_valid(&parsed)
            }
            Err(_) => false,
        }
    }
}

/// Normalize a Tanzanian phone number with the default (lenient) rules.
pub fn normalize_phone_number(raw: &str) -> Result<PhoneNumber, ValidationError> {
    PhoneNormalizer::default().normalize(raw)
}

/// Normalize a list of Tanzanian phone numbers, failing on the first invalid one.
pub fn validate_phone_numbers<I, S>(raws: I) -> Result<Vec<PhoneNumber>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    PhoneNormalizer::default().validate_many(raws)
}
