//! What the movie list should currently display.

use crate::errors::CatalogError;
use crate::types::MovieSummary;

/// Single source of truth for the movie list display.
///
/// Exactly one of loading, error text or a movie list is shown at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderState {
    /// A fetch is in flight.
    #[default]
    Loading,
    /// The latest fetch failed with a user-facing message.
    Error {
        /// Message to show in place of the list
        message: String,
    },
    /// The latest fetch succeeded.
    Ready {
        /// Movies in catalog order, keyed by id
        movies: Vec<MovieSummary>,
    },
}

impl RenderState {
    /// Maps a settled fetch to the state it should display.
    ///
    /// Transport failures are logged with their detail; the user only sees
    /// the generic message.
    pub fn from_outcome(query: &str, outcome: Result<Vec<MovieSummary>, CatalogError>) -> Self {
        match outcome {
            Ok(movies) => RenderState::Ready { movies },
            Err(error) => {
                if error.is_transport() {
                    tracing::warn!("Error fetching movies for query '{query}': {error}");
                } else {
                    tracing::info!("Catalog rejected query '{query}': {error}");
                }
                RenderState::Error {
                    message: error.user_message(),
                }
            }
        }
    }

    /// Checks if a fetch is still pending.
    pub fn is_loading(&self) -> bool {
        matches!(self, RenderState::Loading)
    }

    /// Error text to show, if the state is an error.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            RenderState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Movies to list; empty unless the state is ready.
    pub fn movies(&self) -> &[MovieSummary] {
        match self {
            RenderState::Ready { movies } => movies,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_failure_clears_movies() {
        let state = RenderState::from_outcome("x", Err(CatalogError::Status { status: 404 }));

        assert_eq!(state.error_message(), Some("Failed to fetch movies"));
        assert!(state.movies().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_ready_keeps_movies() {
        let movies = vec![MovieSummary::new(1, "A"), MovieSummary::new(2, "B")];
        let state = RenderState::from_outcome("", Ok(movies.clone()));

        assert_eq!(state.movies(), movies.as_slice());
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_default_is_loading() {
        assert!(RenderState::default().is_loading());
        assert!(RenderState::default().movies().is_empty());
    }
}
