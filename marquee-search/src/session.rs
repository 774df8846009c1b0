//! Search session wiring input, debouncer and coordinator together.

use std::sync::Arc;

use marquee_core::{Debounced, MarqueeConfig, MarqueeError, SearchInput, spawn_debouncer};
use tokio::sync::watch;

use crate::coordinator::{SearchCoordinatorHandle, spawn_search_coordinator};
use crate::providers::CatalogProvider;
use crate::render::RenderState;

/// A running search: keystrokes in, render states out.
///
/// Query changes go through the debouncer before reaching the coordinator,
/// so a burst of keystrokes costs a single fetch. Dropping the session tears
/// down the debouncer and the coordinator; no state is published afterwards.
#[derive(Debug)]
pub struct SearchSession {
    input: SearchInput,
    debounced: Debounced<String>,
    coordinator: SearchCoordinatorHandle,
}

impl SearchSession {
    /// Starts a session with an empty query, which fetches the discover listing.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(config: &MarqueeConfig, provider: Arc<dyn CatalogProvider>) -> Self {
        let input = SearchInput::default();
        let debounced = spawn_debouncer(input.subscribe(), config.search.debounce_quiet);
        let coordinator = spawn_search_coordinator(provider, debounced.subscribe());

        tracing::info!(
            "Search session started (debounce {} ms)",
            config.search.debounce_quiet.as_millis()
        );

        Self {
            input,
            debounced,
            coordinator,
        }
    }

    /// Replaces the raw query text, as typed.
    pub fn set_query(&self, text: impl Into<String>) {
        self.input.set(text);
    }

    /// Raw query text.
    pub fn query(&self) -> String {
        self.input.text()
    }

    /// Query text the latest fetch was issued for.
    pub fn debounced_query(&self) -> String {
        self.debounced.get()
    }

    /// Snapshot of the current render state.
    pub fn render_state(&self) -> RenderState {
        self.coordinator.render_state()
    }

    /// Receiver notified on every published render state.
    pub fn subscribe(&self) -> watch::Receiver<RenderState> {
        self.coordinator.subscribe()
    }

    /// Waits until no fetch is pending and returns the settled state.
    ///
    /// A query set less than one quiet period ago has not been fetched yet;
    /// the state returned may predate it.
    ///
    /// # Errors
    /// - `MarqueeError::SessionClosed` - Session stopped while loading
    pub async fn wait_until_settled(&self) -> Result<RenderState, MarqueeError> {
        self.coordinator.wait_until_settled().await
    }

    /// Waits until the current raw query has passed the debouncer and its
    /// fetch has settled.
    ///
    /// # Errors
    /// - `MarqueeError::SessionClosed` - Session stopped before the fetch settled
    pub async fn wait_for_pending_query(&self) -> Result<RenderState, MarqueeError> {
        let query = self.query();
        self.coordinator.wait_for_query(&query).await
    }

    /// Stops the session and waits for the coordinator to exit.
    pub async fn shutdown(self) {
        let Self {
            input,
            debounced,
            coordinator,
        } = self;
        drop(debounced);
        drop(input);
        coordinator.shutdown().await;
        tracing::info!("Search session stopped");
    }
}
