//! Fetch/render coordination for debounced queries.
//!
//! The coordinator runs as an actor: it reacts to every change of the
//! debounced query by publishing `Loading`, starting one catalog fetch, and
//! publishing the outcome of whichever fetch was started last. Results of
//! older fetches that settle later are discarded.

mod actor;
mod handle;

pub use actor::spawn_search_coordinator;
pub use handle::SearchCoordinatorHandle;
