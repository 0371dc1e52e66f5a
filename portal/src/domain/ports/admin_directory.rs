//! Driven port for the admin login verification procedure.

use async_trait::async_trait;

use crate::domain::credentials::AdminCredentials;

use super::remote::RemoteServiceError;

/// One row returned by the login verification procedure.
///
/// The role is carried as the raw wire string; the workflow maps it onto
/// [`crate::domain::AdminRole`] leniently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminLoginRow {
    /// Stable identifier of the admin account.
    pub id: String,
    /// Login name of the admin account.
    pub username: String,
    /// Raw role string.
    pub role: String,
}

/// Port for exchanging admin credentials against the Remote Data Service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Verify credentials remotely.
    ///
    /// An empty row set means the credentials matched no account; a non-empty
    /// set's first row is the authoritative identity.
    async fn verify_admin_login(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<Vec<AdminLoginRow>, RemoteServiceError>;
}

/// Fixture directory that matches no credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAdminDirectory;

#[async_trait]
impl AdminDirectory for FixtureAdminDirectory {
    async fn verify_admin_login(
        &self,
        _credentials: &AdminCredentials,
    ) -> Result<Vec<AdminLoginRow>, RemoteServiceError> {
        Ok(Vec::new())
    }
}
