//! Handle for observing the search coordinator actor.

use marquee_core::MarqueeError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::render::RenderState;

/// Handle for observing the search coordinator actor.
///
/// Dropping the handle stops the actor and aborts any fetch still in flight.
#[derive(Debug)]
pub struct SearchCoordinatorHandle {
    render: watch::Receiver<RenderState>,
    started_query: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl SearchCoordinatorHandle {
    pub(super) fn new(
        render: watch::Receiver<RenderState>,
        started_query: watch::Receiver<String>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            render,
            started_query,
            task,
        }
    }

    /// Snapshot of the current render state.
    pub fn render_state(&self) -> RenderState {
        self.render.borrow().clone()
    }

    /// Receiver notified on every published render state.
    pub fn subscribe(&self) -> watch::Receiver<RenderState> {
        self.render.clone()
    }

    /// Waits until no fetch is pending and returns the settled state.
    ///
    /// Returns immediately if the current state is already settled.
    ///
    /// # Errors
    /// - `MarqueeError::SessionClosed` - Coordinator stopped while loading
    pub async fn wait_until_settled(&self) -> Result<RenderState, MarqueeError> {
        let mut render = self.render.clone();
        let state = render
            .wait_for(|state| !state.is_loading())
            .await
            .map_err(|_| MarqueeError::SessionClosed)?;
        Ok(state.clone())
    }

    /// Waits until the latest started fetch is for `query` and has settled.
    ///
    /// Meant for the final query of a session; a newer query started before
    /// this one is observed keeps the wait pending.
    ///
    /// # Errors
    /// - `MarqueeError::SessionClosed` - Coordinator stopped before `query` settled
    pub async fn wait_for_query(&self, query: &str) -> Result<RenderState, MarqueeError> {
        let mut started = self.started_query.clone();
        started
            .wait_for(|started| started == query)
            .await
            .map_err(|_| MarqueeError::SessionClosed)?;
        self.wait_until_settled().await
    }

    /// Checks if the coordinator actor is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the coordinator and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
        tracing::debug!("Search coordinator shut down");
    }
}

impl Drop for SearchCoordinatorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
