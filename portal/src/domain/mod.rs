//! Domain model, workflow state machines, and driving services.
//!
//! Purpose: hold every rule the portal core enforces (session identity
//! invariants, the two-step member login, the three-step registration flow)
//! behind ports so no transport or storage detail leaks in. Types are
//! immutable where practical and document their invariants and serde
//! contracts in their own Rustdoc.

pub mod admin_auth;
pub mod catalogue;
pub mod category;
pub mod client;
pub mod credentials;
pub mod identity;
pub mod member_auth;
pub mod mobile_number;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod session;

pub use self::admin_auth::{AdminAuthError, AdminAuthService};
pub use self::catalogue::{CatalogueError, CatalogueService, CategoryOverview};
pub use self::category::{EmploymentCategory, ProgrammeSummary, SubProjectSummary};
pub use self::client::ClientRecord;
pub use self::credentials::{AdminCredentials, AdminCredentialsError};
pub use self::identity::{AdminIdentity, AdminRole, IdentityValidationError, MemberIdentity};
pub use self::member_auth::{
    MemberAuthError, MemberAuthFlow, MemberAuthService, MemberAuthState, VerificationChallenge,
};
pub use self::mobile_number::{MobileNumber, MobileNumberValidationError};
pub use self::registration::{
    EmploymentRegistration, NewRegistration, RegistrationStatus,
};
pub use self::registration_service::{
    ClientVerification, RegistrationError, RegistrationFlow, RegistrationService,
    RegistrationState,
};
pub use self::session::SessionStore;
