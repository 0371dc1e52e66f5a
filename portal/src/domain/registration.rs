//! Employment registration records and their status lifecycle.

use std::fmt;

use chrono::{DateTime, Utc};

use super::mobile_number::MobileNumber;

/// Review status of an employment registration.
///
/// Decodes tolerantly: unknown wire values are preserved in
/// [`RegistrationStatus::Other`] rather than failing, because the only
/// predicate the workflows rely on is "not rejected".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStatus {
    /// Submitted and awaiting review.
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Rejected by an administrator; does not count towards the
    /// one-active-registration limit.
    Rejected,
    /// Any other status the backend may introduce.
    Other(String),
}

impl RegistrationStatus {
    /// Map a wire-format status string onto a status.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Other(raw.to_owned()),
        }
    }

    /// Wire-format name of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Whether this registration has been rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration row as read back from the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmploymentRegistration {
    /// Backend-assigned identifier, when returned.
    pub id: Option<String>,
    /// Client the registration belongs to.
    pub client_id: String,
    /// Category the client applied for.
    pub category_id: String,
    /// Mobile number the registration was submitted under.
    pub mobile_number: String,
    /// Current review status.
    pub status: RegistrationStatus,
    /// Backend-assigned creation time, when returned.
    pub created_at: Option<DateTime<Utc>>,
}

/// New registration to insert; status is always `pending` at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    /// Client the registration belongs to.
    pub client_id: String,
    /// Category the client applied for.
    pub category_id: String,
    /// Mobile number the registration is submitted under.
    pub mobile_number: MobileNumber,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", RegistrationStatus::Pending)]
    #[case("Approved", RegistrationStatus::Approved)]
    #[case(" REJECTED ", RegistrationStatus::Rejected)]
    #[case("on_hold", RegistrationStatus::Other("on_hold".to_owned()))]
    #[case("", RegistrationStatus::Other(String::new()))]
    fn statuses_decode_tolerantly(#[case] raw: &str, #[case] expected: RegistrationStatus) {
        assert_eq!(RegistrationStatus::from_wire(raw), expected);
    }

    #[rstest]
    #[case(RegistrationStatus::Pending, false)]
    #[case(RegistrationStatus::Approved, false)]
    #[case(RegistrationStatus::Rejected, true)]
    #[case(RegistrationStatus::Other("paused".to_owned()), false)]
    fn only_rejected_is_rejected(#[case] status: RegistrationStatus, #[case] expected: bool) {
        assert_eq!(status.is_rejected(), expected);
    }
}
