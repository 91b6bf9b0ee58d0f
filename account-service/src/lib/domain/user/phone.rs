use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::user::errors::PhoneNumberError;

/// Optional `+88` (one optional space after it) or bare `88` country prefix,
/// then an 11-digit mobile number on a valid operator prefix.
static BANGLADESHI_MOBILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\+88 ?|88)?(01[3-9][0-9]{8})$").expect("phone pattern compiles")
});

/// Canonical Bangladeshi mobile number.
///
/// Always holds the local 11-digit form (`01XXXXXXXXX`), so equality,
/// storage uniqueness and lookups do not depend on how the number was typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize raw user input.
    ///
    /// Accepts `01XXXXXXXXX`, `8801XXXXXXXXX`, `+8801XXXXXXXXX` and
    /// `+88 01XXXXXXXXX`. Input is not trimmed.
    ///
    /// # Errors
    /// * `InvalidPhoneFormat` - Input matches none of the accepted shapes
    pub fn parse(raw: &str) -> Result<Self, PhoneNumberError> {
        BANGLADESHI_MOBILE
            .captures(raw)
            .and_then(|captures| captures.get(1))
            .map(|local| Self(local.as_str().to_string()))
            .ok_or(PhoneNumberError::InvalidPhoneFormat)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe rendering that keeps the operator prefix and last three digits.
    pub fn masked(&self) -> String {
        let (head, rest) = self.0.split_at(3);
        let tail = &rest[rest.len() - 3..];
        format!("{}{}{}", head, "*".repeat(rest.len() - 3), tail)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
