//! Admin login credentials.
//!
//! Inputs are validated here so the auth workflow never issues a remote call
//! for a shape it already knows is invalid.

use std::fmt;

use zeroize::Zeroizing;

/// Validation errors returned when admin credential inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCredentialsError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for AdminCredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for AdminCredentialsError {}

/// Validated admin credentials passed to the login exchange.
///
/// ## Invariants
/// - `username` is trimmed and non-empty after trimming.
/// - `password` is non-empty and kept byte-for-byte as entered; it is zeroed
///   on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    /// Construct credentials from raw username and password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, AdminCredentialsError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(AdminCredentialsError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(AdminCredentialsError::EmptyPassword);
        }
        Ok(Self {
            username: trimmed.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the account lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as entered by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "secret", AdminCredentialsError::EmptyUsername)]
    #[case("  ", "secret", AdminCredentialsError::EmptyUsername)]
    #[case("root", "", AdminCredentialsError::EmptyPassword)]
    fn invalid_parts_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: AdminCredentialsError,
    ) {
        let err =
            AdminCredentials::try_from_parts(username, password).expect_err("must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn username_is_trimmed_and_password_kept_verbatim() {
        let creds =
            AdminCredentials::try_from_parts("  root ", " p w ").expect("valid credentials");
        assert_eq!(creds.username(), "root");
        assert_eq!(creds.password(), " p w ");
    }
}
