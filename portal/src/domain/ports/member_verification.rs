//! Driven port for the member verification-code procedures.
//!
//! Outcome types are decoded tolerantly at the adapter boundary: absent or
//! oddly-typed fields default instead of failing, preserving the
//! present-and-truthy acceptance rule the workflows rely on.

use async_trait::async_trait;

use crate::domain::mobile_number::MobileNumber;

use super::remote::RemoteServiceError;

/// Outcome of the code issuance procedure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeIssueOutcome {
    /// Whether the service issued a code.
    pub success: bool,
    /// The issued one-time code, surfaced for the caller to relay.
    pub verification_code: Option<String>,
    /// Service-provided failure text, when present.
    pub error: Option<String>,
}

/// Member row nested in a successful login outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberLoginRow {
    /// Stable identifier of the member record.
    pub id: String,
    /// Mobile number held by the remote record.
    pub mobile_number: String,
    /// Display name, when the record carries one.
    pub name: Option<String>,
}

/// Outcome of the code exchange procedure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberLoginOutcome {
    /// Whether the code was accepted.
    pub success: bool,
    /// The authenticated member; login only succeeds when present.
    pub member: Option<MemberLoginRow>,
    /// Service-provided failure text, when present.
    pub error: Option<String>,
}

/// Port for the two-step mobile-number verification exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberVerification: Send + Sync {
    /// Ask the service to issue a one-time code for the number.
    async fn send_verification_code(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<CodeIssueOutcome, RemoteServiceError>;

    /// Exchange the number and code for a member record.
    async fn verify_member_login(
        &self,
        mobile_number: &MobileNumber,
        code: &str,
    ) -> Result<MemberLoginOutcome, RemoteServiceError>;
}

/// Fixture verification service that declines every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureMemberVerification;

#[async_trait]
impl MemberVerification for FixtureMemberVerification {
    async fn send_verification_code(
        &self,
        _mobile_number: &MobileNumber,
    ) -> Result<CodeIssueOutcome, RemoteServiceError> {
        Ok(CodeIssueOutcome::default())
    }

    async fn verify_member_login(
        &self,
        _mobile_number: &MobileNumber,
        _code: &str,
    ) -> Result<MemberLoginOutcome, RemoteServiceError> {
        Ok(MemberLoginOutcome::default())
    }
}
