use std::fmt;

use auth::IssuedToken;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::BalanceError;
use crate::user::errors::DisplayNameError;
use crate::user::errors::PinError;
use crate::user::errors::UserIdError;
use crate::user::errors::ValidationErrors;
use crate::user::phone::PhoneNumber;

/// User aggregate entity.
///
/// Represents one wallet account. `pin_hash` never leaves the domain: every
/// outward projection is built field by field and leaves it out.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub phone: PhoneNumber,
    pub pin_hash: String,
    pub balance: Balance,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Surrounding whitespace is trimmed; what remains must be at least 2 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MIN_LENGTH: usize = 2;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 2 characters after trimming
    pub fn new(name: &str) -> Result<Self, DisplayNameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(DisplayNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw PIN that passed shape validation.
///
/// Only lives for the duration of a request; `Debug` never prints the digits.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 6;

    /// Validate a raw PIN: 4 to 6 ASCII digits.
    ///
    /// # Errors
    /// * `InvalidLength` - Fewer than 4 or more than 6 characters
    /// * `NonNumeric` - Contains anything but `0`-`9`
    pub fn new(pin: &str) -> Result<Self, PinError> {
        let length = pin.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(PinError::InvalidLength { actual: length });
        }
        if !pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PinError::NonNumeric);
        }
        Ok(Self(pin.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// Non-negative account balance in whole taka.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Balance(i64);

impl Balance {
    /// # Errors
    /// * `Negative` - Amount below zero
    pub fn new(amount: i64) -> Result<Self, BalanceError> {
        if amount < 0 {
            return Err(BalanceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> i64 {
        self.0
    }
}

/// Command to open a new account.
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: DisplayName,
    pub phone: PhoneNumber,
    pub pin: Pin,
}

impl RegisterCommand {
    /// Validate raw registration fields, reporting every failing field at once.
    ///
    /// # Errors
    /// * `ValidationErrors` - One entry per invalid field
    pub fn parse(name: &str, phone: &str, pin: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.collect("name", DisplayName::new(name));
        let phone = errors.collect("phone", PhoneNumber::parse(phone));
        let pin = errors.collect("pin", Pin::new(pin));

        match (name, phone, pin) {
            (Some(name), Some(phone), Some(pin)) => Ok(Self { name, phone, pin }),
            _ => Err(errors),
        }
    }
}

/// Command to sign in to an existing account.
#[derive(Debug)]
pub struct LoginCommand {
    pub phone: PhoneNumber,
    pub pin: Pin,
}

impl LoginCommand {
    /// Validate raw login fields, reporting every failing field at once.
    ///
    /// # Errors
    /// * `ValidationErrors` - One entry per invalid field
    pub fn parse(phone: &str, pin: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let phone = errors.collect("phone", PhoneNumber::parse(phone));
        let pin = errors.collect("pin", Pin::new(pin));

        match (phone, pin) {
            (Some(phone), Some(pin)) => Ok(Self { phone, pin }),
            _ => Err(errors),
        }
    }
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: IssuedToken,
    pub user: User,
}
