//! Marquee Search - Movie catalog search
#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Turns debounced search queries into catalog requests and the results into
//! a single render state: loading, an error message, or a list of movies.

pub mod coordinator;
pub mod endpoint;
pub mod errors;
pub mod providers;
pub mod render;
pub mod session;
pub mod types;

// Re-export main types
pub use coordinator::{SearchCoordinatorHandle, spawn_search_coordinator};
pub use endpoint::CatalogEndpoint;
pub use errors::CatalogError;
pub use providers::{CatalogProvider, DemoProvider, TmdbProvider};
pub use render::RenderState;
pub use session::SearchSession;
pub use types::{CatalogResponse, MovieSummary};

/// Convenience type alias for Results with CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;
