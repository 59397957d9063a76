//! Failure taxonomy for the session core.

use thiserror::Error;

/// Reasons an auth call can fail.
///
/// `Display` is the message shown to the user by the login and register forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),

    /// The server answered with markup (or anything else that is not JSON)
    #[error("The server returned an unexpected response. Please try again later.")]
    ServerMisconfigured,

    #[error("The server took too long to respond. Please try again.")]
    Timeout,

    #[error("Unable to reach the server: {0}")]
    NetworkFailure(String),

    #[error("Your session has expired. Please sign in again.")]
    TokenInvalidOrExpired,

    /// The server refused a registration (duplicate email, validation error, ...)
    #[error("{0}")]
    Rejected(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Malformed server response: {0}")]
    MalformedResponse(String),

    /// A newer session operation started while this one was in flight
    #[error("Request superseded by a newer session change")]
    Superseded,
}

impl AuthError {
    /// Default message for a rejected login without a server-provided detail.
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials("Invalid credentials".to_string())
    }

    /// Short machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            AuthError::ServerMisconfigured => "SERVER_MISCONFIGURED",
            AuthError::Timeout => "TIMEOUT",
            AuthError::NetworkFailure(_) => "NETWORK_FAILURE",
            AuthError::TokenInvalidOrExpired => "TOKEN_INVALID",
            AuthError::Rejected(_) => "REJECTED",
            AuthError::ServerError { .. } => "SERVER_ERROR",
            AuthError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AuthError::Superseded => "SUPERSEDED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_shows_server_detail() {
        let err = AuthError::InvalidCredentials("Invalid credentials".to_string());
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_taxonomy_messages_are_distinct() {
        let messages = [
            AuthError::invalid_credentials().to_string(),
            AuthError::Timeout.to_string(),
            AuthError::ServerMisconfigured.to_string(),
            AuthError::NetworkFailure("connection refused".to_string()).to_string(),
        ];

        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_server_error_message() {
        let err = AuthError::ServerError {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (503): maintenance");
        assert_eq!(err.code(), "SERVER_ERROR");
    }
}
