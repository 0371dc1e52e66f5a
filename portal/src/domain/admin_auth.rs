//! Admin authentication workflow.
//!
//! A single-step credential exchange: one verification request, no retry.
//! The first returned row is authoritative and is persisted before the call
//! returns.

use std::sync::Arc;

use tracing::{debug, warn};

use super::credentials::{AdminCredentials, AdminCredentialsError};
use super::identity::AdminIdentity;
use super::ports::{AdminDirectory, SessionStorage};
use super::session::SessionStore;

const LOGIN_FAILED: &str = "Login failed";

/// Failures surfaced by the admin login exchange.
///
/// Every variant displays as the human-facing message the portal shows; the
/// caller re-prompts, nothing is retried here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminAuthError {
    /// Inputs failed shape validation; no remote call was made.
    #[error(transparent)]
    Validation(#[from] AdminCredentialsError),
    /// The verification exchange itself failed.
    #[error("{message}")]
    Remote {
        /// Human-facing failure text.
        message: String,
    },
    /// The exchange completed but matched no account.
    #[error("Invalid username or password")]
    InvalidCredentials,
}

impl AdminAuthError {
    fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }
}

/// Driving service for admin login and logout.
pub struct AdminAuthService<D, S> {
    directory: Arc<D>,
    sessions: Arc<SessionStore<S>>,
}

impl<D, S> AdminAuthService<D, S> {
    /// Create the service over a directory port and the session store.
    pub fn new(directory: Arc<D>, sessions: Arc<SessionStore<S>>) -> Self {
        Self {
            directory,
            sessions,
        }
    }
}

impl<D, S> AdminAuthService<D, S>
where
    D: AdminDirectory,
    S: SessionStorage,
{
    /// Exchange credentials for an admin identity and persist it.
    ///
    /// Backend-reported failures surface their own message; transport
    /// failures are normalised. An empty row set is
    /// [`AdminAuthError::InvalidCredentials`] and persists nothing.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminIdentity, AdminAuthError> {
        let credentials = AdminCredentials::try_from_parts(username, password)?;
        let rows = self
            .directory
            .verify_admin_login(&credentials)
            .await
            .map_err(|error| {
                debug!(error = %error, "admin login exchange failed");
                AdminAuthError::remote(error.surfaced_message(LOGIN_FAILED))
            })?;

        let Some(row) = rows.into_iter().next() else {
            return Err(AdminAuthError::InvalidCredentials);
        };

        let identity = AdminIdentity::try_from_parts(row.id, row.username, &row.role)
            .map_err(|error| {
                warn!(error = %error, "admin login returned an unusable row");
                AdminAuthError::remote(LOGIN_FAILED)
            })?;

        self.sessions.persist_admin(&identity).map_err(|error| {
            warn!(error = %error, "admin session persist failed");
            AdminAuthError::remote(LOGIN_FAILED)
        })?;
        Ok(identity)
    }

    /// Clear the admin session unconditionally; no remote call.
    pub fn logout(&self) {
        if let Err(error) = self.sessions.clear_admin() {
            warn!(error = %error, "admin session clear failed");
        }
    }
}
