//! Mobile number value type shared by the auth and registration flows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`MobileNumber::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobileNumberValidationError {
    /// Input was empty once trimmed.
    Empty,
}

impl fmt::Display for MobileNumberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "mobile number must not be empty"),
        }
    }
}

impl std::error::Error for MobileNumberValidationError {}

/// Caller-supplied mobile number used for lookups and verification exchanges.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
///
/// No format validation is applied beyond that: remote records are matched by
/// exact string equality, so the number is carried as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Validate and construct a [`MobileNumber`] from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MobileNumberValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MobileNumberValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<MobileNumber> for String {
    fn from(value: MobileNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = MobileNumberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
