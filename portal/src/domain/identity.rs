//! Session identity types for the two principals the portal recognises.
//!
//! Identities are created only after a successful verification exchange and
//! are serialised to durable client storage through explicit DTOs so the
//! persisted shape stays stable across refactors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::mobile_number::{MobileNumber, MobileNumberValidationError};

/// Validation errors returned by the identity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// Identifier was missing or blank.
    EmptyId,
    /// Admin username was missing or blank.
    EmptyUsername,
    /// Member mobile number failed validation.
    InvalidMobileNumber(MobileNumberValidationError),
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "identity id must not be empty"),
            Self::EmptyUsername => write!(f, "admin username must not be empty"),
            Self::InvalidMobileNumber(err) => write!(f, "member mobile number invalid: {err}"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Privilege level attached to an authenticated admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Regular administrative access.
    Admin,
    /// Elevated access that additionally unlocks content edit mode.
    SuperAdmin,
}

impl AdminRole {
    /// Map a wire-format role string onto a role.
    ///
    /// Unknown values fall back to [`AdminRole::Admin`]: the remote service is
    /// trusted for authentication, so an unrecognised role must not lock the
    /// account out, but it must never grant elevated access either.
    pub fn from_wire(raw: &str) -> Self {
        if raw.trim() == "super_admin" {
            Self::SuperAdmin
        } else {
            Self::Admin
        }
    }

    /// Wire-format name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

/// Authenticated administrative principal.
///
/// ## Invariants
/// - `id` and `username` are non-empty.
/// - Presence of a value implies a previously successful login exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AdminIdentityDto", into = "AdminIdentityDto")]
pub struct AdminIdentity {
    id: String,
    username: String,
    role: AdminRole,
}

impl AdminIdentity {
    /// Build an identity from the parts returned by the login exchange.
    pub fn try_from_parts(
        id: impl Into<String>,
        username: impl Into<String>,
        role: &str,
    ) -> Result<Self, IdentityValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentityValidationError::EmptyId);
        }
        let username = username.into();
        if username.trim().is_empty() {
            return Err(IdentityValidationError::EmptyUsername);
        }
        Ok(Self {
            id,
            username,
            role: AdminRole::from_wire(role),
        })
    }

    /// Stable identifier of the admin account.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Login name of the admin account.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Privilege level of the admin account.
    pub fn role(&self) -> AdminRole {
        self.role
    }

    /// Whether this admin holds the elevated role.
    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AdminIdentityDto {
    id: String,
    username: String,
    role: String,
}

impl From<AdminIdentity> for AdminIdentityDto {
    fn from(value: AdminIdentity) -> Self {
        Self {
            id: value.id,
            username: value.username,
            role: value.role.as_str().to_owned(),
        }
    }
}

impl TryFrom<AdminIdentityDto> for AdminIdentity {
    type Error = IdentityValidationError;

    fn try_from(value: AdminIdentityDto) -> Result<Self, Self::Error> {
        AdminIdentity::try_from_parts(value.id, value.username, &value.role)
    }
}

/// Authenticated member principal.
///
/// ## Invariants
/// - `id` is non-empty and `mobile_number` satisfies [`MobileNumber`].
/// - `is_verified` is set when the identity was produced by a successful
///   code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MemberIdentityDto", into = "MemberIdentityDto")]
pub struct MemberIdentity {
    id: String,
    mobile_number: MobileNumber,
    name: Option<String>,
    is_verified: bool,
}

impl MemberIdentity {
    /// Build an identity from the parts returned by the login exchange.
    pub fn try_from_parts(
        id: impl Into<String>,
        mobile_number: impl AsRef<str>,
        name: Option<String>,
        is_verified: bool,
    ) -> Result<Self, IdentityValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentityValidationError::EmptyId);
        }
        let mobile_number = MobileNumber::new(mobile_number)
            .map_err(IdentityValidationError::InvalidMobileNumber)?;
        Ok(Self {
            id,
            mobile_number,
            name,
            is_verified,
        })
    }

    /// Stable identifier of the member record.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Mobile number the member authenticated with.
    pub fn mobile_number(&self) -> &MobileNumber {
        &self.mobile_number
    }

    /// Display name, when the remote record carries one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the identity was produced by a successful code exchange.
    pub fn is_verified(&self) -> bool {
        self.is_verified
    }
}

// Persisted shape matches the original snake_case layout; camelCase synonyms
// are accepted on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemberIdentityDto {
    id: String,
    #[serde(alias = "mobileNumber")]
    mobile_number: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "isVerified")]
    is_verified: bool,
}

impl From<MemberIdentity> for MemberIdentityDto {
    fn from(value: MemberIdentity) -> Self {
        Self {
            id: value.id,
            mobile_number: value.mobile_number.into(),
            name: value.name,
            is_verified: value.is_verified,
        }
    }
}

impl TryFrom<MemberIdentityDto> for MemberIdentity {
    type Error = IdentityValidationError;

    fn try_from(value: MemberIdentityDto) -> Result<Self, Self::Error> {
        MemberIdentity::try_from_parts(
            value.id,
            value.mobile_number,
            value.name,
            value.is_verified,
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin", AdminRole::Admin)]
    #[case("super_admin", AdminRole::SuperAdmin)]
    #[case(" super_admin ", AdminRole::SuperAdmin)]
    #[case("moderator", AdminRole::Admin)]
    #[case("", AdminRole::Admin)]
    fn roles_parse_leniently(#[case] raw: &str, #[case] expected: AdminRole) {
        assert_eq!(AdminRole::from_wire(raw), expected);
    }

    #[test]
    fn admin_identity_rejects_blank_parts() {
        let err = AdminIdentity::try_from_parts("", "root", "admin").expect_err("empty id");
        assert_eq!(err, IdentityValidationError::EmptyId);
        let err = AdminIdentity::try_from_parts("a1", "  ", "admin").expect_err("empty username");
        assert_eq!(err, IdentityValidationError::EmptyUsername);
    }

    #[test]
    fn admin_identity_round_trips_with_wire_role() {
        let identity =
            AdminIdentity::try_from_parts("a1", "root", "super_admin").expect("valid identity");
        assert!(identity.is_super_admin());
        let json = serde_json::to_string(&identity).expect("serialize");
        assert!(json.contains("\"super_admin\""));
        let back: AdminIdentity = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, identity);
    }

    #[test]
    fn member_identity_accepts_camel_case_synonyms() {
        let json = r#"{"id":"m1","mobileNumber":"9876543210","isVerified":true}"#;
        let identity: MemberIdentity = serde_json::from_str(json).expect("deserialize");
        assert_eq!(identity.mobile_number().as_ref(), "9876543210");
        assert!(identity.is_verified());
        assert_eq!(identity.name(), None);
    }

    #[test]
    fn member_identity_persists_snake_case() {
        let identity = MemberIdentity::try_from_parts("m1", "9876543210", None, true)
            .expect("valid identity");
        let json = serde_json::to_string(&identity).expect("serialize");
        assert!(json.contains("\"mobile_number\""));
        assert!(json.contains("\"is_verified\""));
    }

    #[test]
    fn member_identity_rejects_blank_mobile_number() {
        let err = MemberIdentity::try_from_parts("m1", " ", None, true)
            .expect_err("blank mobile number");
        assert_eq!(
            err,
            IdentityValidationError::InvalidMobileNumber(MobileNumberValidationError::Empty)
        );
    }
}
