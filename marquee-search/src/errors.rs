//! Error types for catalog search.

use thiserror::Error;

/// Message shown when the catalog answers with a non-success status.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch movies";

/// Message shown when the catalog could not be reached or understood.
pub const RETRY_LATER_MESSAGE: &str = "Failed to fetch movies. Please try again later.";

/// Errors that can occur while fetching movies from a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog answered with a non-success HTTP status.
    #[error("Catalog returned HTTP {status}")]
    Status {
        /// HTTP status code of the response
        status: u16,
    },

    /// Request could not be sent or the response body could not be read.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// Response body was not valid catalog JSON.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// Catalog answered successfully but flagged the request as failed.
    #[error("Catalog rejected request: {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// Message supplied by the catalog, if any
        message: Option<String>,
    },

    /// Configured base URL cannot be used to build request URLs.
    #[error("Invalid catalog base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The offending base URL
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

impl CatalogError {
    /// Returns the message to show the user for this failure.
    ///
    /// Transport details are never included; only catalog-supplied rejection
    /// messages are passed through.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Status { .. } => FETCH_FAILED_MESSAGE.to_string(),
            CatalogError::Rejected { message } => message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(FETCH_FAILED_MESSAGE)
                .to_string(),
            CatalogError::Network { .. }
            | CatalogError::Parse { .. }
            | CatalogError::InvalidBaseUrl { .. } => RETRY_LATER_MESSAGE.to_string(),
        }
    }

    /// Checks if this failure happened below the application level.
    pub fn is_transport(&self) -> bool {
        !matches!(self, CatalogError::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            CatalogError::Status { status: 404 }.user_message(),
            "Failed to fetch movies"
        );
        assert_eq!(
            CatalogError::Rejected {
                message: Some("No results".to_string())
            }
            .user_message(),
            "No results"
        );
        assert_eq!(
            CatalogError::Rejected { message: None }.user_message(),
            "Failed to fetch movies"
        );
        assert_eq!(
            CatalogError::Network {
                reason: "connection refused".to_string()
            }
            .user_message(),
            "Failed to fetch movies. Please try again later."
        );
    }

    #[test]
    fn test_transport_classification() {
        assert!(CatalogError::Status { status: 500 }.is_transport());
        assert!(
            CatalogError::Parse {
                reason: "eof".to_string()
            }
            .is_transport()
        );
        assert!(!CatalogError::Rejected { message: None }.is_transport());
    }
}
