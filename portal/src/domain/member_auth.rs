//! Member authentication workflow: mobile number in, one-time code back,
//! code exchanged for a session.
//!
//! The flow state lives in [`MemberAuthFlow`], a pure state machine; the
//! service performs the remote exchanges and applies their outcomes. Every
//! outcome is tagged with the flow generation it was issued under, so a
//! response that lands after a [`MemberAuthFlow::reset`] is discarded as a
//! no-op instead of resurrecting a superseded flow.

use std::sync::Arc;

use tracing::{debug, warn};

use super::identity::MemberIdentity;
use super::mobile_number::MobileNumber;
use super::ports::{MemberLoginOutcome, MemberVerification, SessionStorage};
use super::session::SessionStore;

const LOGIN_FAILED: &str = "Login failed";
const SEND_CODE_FAILED: &str = "Failed to send verification code";
const NETWORK_ERROR: &str = "Network error occurred";

/// States of the member login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberAuthState {
    /// Waiting for a mobile number.
    AwaitingMobileNumber,
    /// A code was issued for this number; waiting for it to be entered.
    AwaitingCode {
        /// Number the code was issued for.
        mobile_number: MobileNumber,
    },
    /// The exchange succeeded and a session is held.
    Authenticated,
}

/// Pure state machine for the two-step member login.
///
/// At most one verification flow is active at a time; `reset` (and nothing
/// else) abandons the current one. The generation counter increments on every
/// reset so outcomes of superseded requests can be recognised and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAuthFlow {
    state: MemberAuthState,
    generation: u64,
}

impl MemberAuthFlow {
    /// Start a fresh flow awaiting a mobile number.
    pub fn new() -> Self {
        Self {
            state: MemberAuthState::AwaitingMobileNumber,
            generation: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> &MemberAuthState {
        &self.state
    }

    /// Generation the next outcome must be issued under to be applied.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Return to [`MemberAuthState::AwaitingMobileNumber`] from any state,
    /// dropping the held number and invalidating outstanding outcomes.
    pub fn reset(&mut self) {
        self.state = MemberAuthState::AwaitingMobileNumber;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Record that a code was issued, unless the flow moved on since.
    ///
    /// Returns whether the outcome was applied.
    pub fn apply_code_sent(&mut self, issued: u64, mobile_number: MobileNumber) -> bool {
        if issued != self.generation {
            return false;
        }
        self.state = MemberAuthState::AwaitingCode { mobile_number };
        true
    }

    /// Record a successful code exchange, unless the flow moved on since.
    ///
    /// Returns whether the outcome was applied.
    pub fn apply_authenticated(&mut self, issued: u64) -> bool {
        if issued != self.generation {
            return false;
        }
        self.state = MemberAuthState::Authenticated;
        true
    }
}

impl Default for MemberAuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Code issuance result handed back to the caller.
///
/// The code is surfaced directly: in this deployment the caller relays it to
/// the member, the workflow does not send it out-of-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationChallenge {
    /// Number the code was issued for.
    pub mobile_number: MobileNumber,
    /// The issued one-time code, when the service returned it.
    pub verification_code: Option<String>,
}

/// Failures surfaced by the member login flow.
///
/// Every variant displays as the human-facing message the portal shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberAuthError {
    /// Inputs failed validation; no remote call was made.
    #[error("{message}")]
    Validation {
        /// Human-facing failure text.
        message: String,
    },
    /// The remote exchange failed.
    #[error("{message}")]
    Remote {
        /// Human-facing failure text.
        message: String,
    },
    /// The exchange completed but the service declined it.
    #[error("{message}")]
    Rejected {
        /// Human-facing failure text.
        message: String,
    },
}

impl MemberAuthError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Driving service for the member login flow.
pub struct MemberAuthService<V, S> {
    verification: Arc<V>,
    sessions: Arc<SessionStore<S>>,
}

impl<V, S> MemberAuthService<V, S> {
    /// Create the service over a verification port and the session store.
    pub fn new(verification: Arc<V>, sessions: Arc<SessionStore<S>>) -> Self {
        Self {
            verification,
            sessions,
        }
    }
}

impl<V, S> MemberAuthService<V, S>
where
    V: MemberVerification,
    S: SessionStorage,
{
    /// Ask the service to issue a one-time code for the number.
    ///
    /// On success the flow advances to [`MemberAuthState::AwaitingCode`] and
    /// the challenge carries the issued code. On any failure the flow state
    /// is left untouched.
    pub async fn send_verification_code(
        &self,
        flow: &mut MemberAuthFlow,
        mobile_number: &str,
    ) -> Result<VerificationChallenge, MemberAuthError> {
        let mobile = MobileNumber::new(mobile_number)
            .map_err(|_| MemberAuthError::validation("Please enter your mobile number"))?;
        let issued = flow.generation();

        let outcome = self
            .verification
            .send_verification_code(&mobile)
            .await
            .map_err(|error| {
                debug!(error = %error, "verification code issuance failed");
                MemberAuthError::remote(error.surfaced_message(NETWORK_ERROR))
            })?;

        if !outcome.success {
            return Err(MemberAuthError::rejected(SEND_CODE_FAILED));
        }

        if !flow.apply_code_sent(issued, mobile.clone()) {
            debug!("discarding verification code issued for a superseded flow");
        }
        Ok(VerificationChallenge {
            mobile_number: mobile,
            verification_code: outcome.verification_code,
        })
    }

    /// Exchange the held number and the entered code for a member session.
    ///
    /// Success requires both a truthy success flag and a member payload in
    /// the response; the identity is persisted before the call returns. On
    /// any failure nothing is persisted and the flow stays in
    /// [`MemberAuthState::AwaitingCode`].
    pub async fn verify_and_login(
        &self,
        flow: &mut MemberAuthFlow,
        code: &str,
    ) -> Result<MemberIdentity, MemberAuthError> {
        let MemberAuthState::AwaitingCode { mobile_number } = flow.state() else {
            return Err(MemberAuthError::validation(
                "No verification code has been requested",
            ));
        };
        let mobile = mobile_number.clone();
        if code.trim().is_empty() {
            return Err(MemberAuthError::validation(
                "Please enter the verification code",
            ));
        }
        let issued = flow.generation();

        let outcome = self
            .verification
            .verify_member_login(&mobile, code)
            .await
            .map_err(|error| {
                debug!(error = %error, "member login exchange failed");
                MemberAuthError::remote(error.surfaced_message(LOGIN_FAILED))
            })?;

        let MemberLoginOutcome {
            success,
            member,
            error,
        } = outcome;
        let row = match (success, member) {
            (true, Some(row)) => row,
            _ => {
                return Err(MemberAuthError::rejected(
                    error.unwrap_or_else(|| LOGIN_FAILED.to_owned()),
                ));
            }
        };

        let identity = MemberIdentity::try_from_parts(row.id, row.mobile_number, row.name, true)
            .map_err(|error| {
                warn!(error = %error, "member login returned an unusable payload");
                MemberAuthError::rejected(LOGIN_FAILED)
            })?;

        self.sessions.persist_member(&identity).map_err(|error| {
            warn!(error = %error, "member session persist failed");
            MemberAuthError::remote(LOGIN_FAILED)
        })?;

        if !flow.apply_authenticated(issued) {
            debug!("discarding login completion for a superseded flow");
        }
        Ok(identity)
    }

    /// Clear the member session unconditionally; no remote call.
    pub fn logout(&self) {
        if let Err(error) = self.sessions.clear_member() {
            warn!(error = %error, "member session clear failed");
        }
    }
}
