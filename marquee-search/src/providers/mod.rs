//! Catalog provider implementations.

use async_trait::async_trait;

use crate::types::MovieSummary;

pub mod demo;
#[cfg(test)]
pub mod mock;
pub mod tmdb;

pub use demo::DemoProvider;
#[cfg(test)]
pub use mock::ScriptedProvider;
pub use tmdb::TmdbProvider;

/// Trait for movie catalog providers.
///
/// Implementations answer one query with one list of movies: the search
/// results for a non-empty query, the popular listing for an empty one.
#[async_trait]
pub trait CatalogProvider: Send + Sync + std::fmt::Debug {
    /// Fetches the movies for `query`, most popular first.
    ///
    /// # Errors
    /// - `CatalogError::Status` - Catalog answered with a non-success status
    /// - `CatalogError::Network` - Network connectivity issues
    /// - `CatalogError::Parse` - Response body was not catalog JSON
    /// - `CatalogError::Rejected` - Catalog flagged the request as failed
    async fn fetch_movies(&self, query: &str) -> crate::Result<Vec<MovieSummary>>;
}
