//! Error contract shared by every Remote Data Service port.

/// Errors surfaced while talking to the Remote Data Service.
///
/// Workflows distinguish backend-reported failures (whose message is shown to
/// the user where the original surfaced it) from transport and decode
/// failures (normalised to generic messages at the workflow boundary).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteServiceError {
    /// The service answered with an error body.
    #[error("remote service reported an error: {message}")]
    Backend { message: String },
    /// The request never completed: connection, timeout, or protocol failure.
    #[error("remote service transport failed: {message}")]
    Transport { message: String },
    /// The response arrived but could not be decoded.
    #[error("remote service response decode failed: {message}")]
    Decode { message: String },
}

impl RemoteServiceError {
    /// Build a [`RemoteServiceError::Backend`] from any displayable cause.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Build a [`RemoteServiceError::Transport`] from any displayable cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`RemoteServiceError::Decode`] from any displayable cause.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Message fit for the user: the backend's own words for backend errors,
    /// the supplied fallback for everything else.
    pub fn surfaced_message(&self, fallback: &str) -> String {
        match self {
            Self::Backend { message } => message.clone(),
            Self::Transport { .. } | Self::Decode { .. } => fallback.to_owned(),
        }
    }
}
