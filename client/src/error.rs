//! Error handling for the Scrap ERP client
//!
//! Every failure of a backend call is mapped onto [`ClientError`] with the
//! message the user is expected to see.

use thiserror::Error;

/// Shown instead of the raw body for 5xx responses in production
pub const MASKED_SERVER_ERROR: &str =
    "An unexpected error occurred. Please contact the service provider.";

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Transport errors
    #[error("Unable to connect to the server. Please ensure the backend is running and accessible.")]
    Network(#[source] reqwest::Error),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Server returned invalid JSON: {0}")]
    InvalidJson(String),

    // Backend errors
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("An unexpected error occurred. Please contact the service provider.")]
    ServerError { status: u16 },

    /// The backend answered `success: false`
    #[error("{0}")]
    Rejected(String),

    // Local errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Report error: {0}")]
    Report(String),
}

impl ClientError {
    /// A fresh login is required
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Api { status, .. } | ClientError::ServerError { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<csv::Error> for ClientError {
    fn from(e: csv::Error) -> Self {
        ClientError::Report(e.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let api = ClientError::Api {
            status: 400,
            message: "Invalid voucher".to_string(),
        };
        assert_eq!(api.to_string(), "Invalid voucher");
        assert_eq!(api.status(), Some(400));

        let masked = ClientError::ServerError { status: 500 };
        assert_eq!(masked.to_string(), MASKED_SERVER_ERROR);

        let missing = ClientError::MissingFields(vec!["Unit", "Reason"]);
        assert_eq!(missing.to_string(), "Missing fields: Unit, Reason");
    }

    #[test]
    fn test_unauthorized() {
        assert!(ClientError::Unauthorized.is_unauthorized());
        assert_eq!(ClientError::Unauthorized.status(), Some(401));
        assert!(!ClientError::Validation("x".into()).is_unauthorized());
    }
}
