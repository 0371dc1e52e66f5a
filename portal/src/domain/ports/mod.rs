//! Driven ports for the hexagonal boundary.
//!
//! Each port ships a `Fixture*` implementation for wiring and, under test, a
//! mockall mock for behavioural assertions.

mod admin_directory;
mod category_catalogue;
mod client_directory;
mod member_verification;
mod registration_repository;
mod remote;
mod session_storage;

#[cfg(test)]
pub use admin_directory::MockAdminDirectory;
pub use admin_directory::{AdminDirectory, AdminLoginRow, FixtureAdminDirectory};
#[cfg(test)]
pub use category_catalogue::MockCategoryCatalogue;
pub use category_catalogue::{CategoryCatalogue, FixtureCategoryCatalogue};
#[cfg(test)]
pub use client_directory::MockClientDirectory;
pub use client_directory::{ClientDirectory, FixtureClientDirectory};
#[cfg(test)]
pub use member_verification::MockMemberVerification;
pub use member_verification::{
    CodeIssueOutcome, FixtureMemberVerification, MemberLoginOutcome, MemberLoginRow,
    MemberVerification,
};
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{FixtureRegistrationRepository, RegistrationRepository};
pub use remote::RemoteServiceError;
#[cfg(test)]
pub use session_storage::MockSessionStorage;
pub use session_storage::{NoopSessionStorage, SessionKind, SessionStorage, SessionStorageError};
