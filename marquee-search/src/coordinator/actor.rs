//! Actor implementation for the search coordinator.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;

use super::handle::SearchCoordinatorHandle;
use crate::errors::CatalogError;
use crate::providers::CatalogProvider;
use crate::render::RenderState;
use crate::types::MovieSummary;

/// Spawns the search coordinator actor and returns its handle.
///
/// The actor fetches immediately for the current debounced query, then once
/// per change. It stops when the debounced sender is dropped or the handle
/// is dropped.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use std::sync::Arc;
///
/// use marquee_search::coordinator::spawn_search_coordinator;
/// use marquee_search::providers::DemoProvider;
/// use tokio::sync::watch;
///
/// let (query, debounced) = watch::channel(String::new());
/// let handle = spawn_search_coordinator(Arc::new(DemoProvider::new()), debounced);
/// query.send_replace("dune".to_string());
/// let state = handle.wait_until_settled().await;
/// # }
/// ```
pub fn spawn_search_coordinator(
    provider: Arc<dyn CatalogProvider>,
    debounced: watch::Receiver<String>,
) -> SearchCoordinatorHandle {
    let (state, render) = watch::channel(RenderState::Loading);
    let (started, started_query) = watch::channel(debounced.borrow().clone());
    let actor = CoordinatorActor {
        provider,
        state,
        started,
        in_flight: JoinSet::new(),
        latest: 0,
    };

    let task = tokio::spawn(async move {
        actor.run(debounced).await;
    });

    SearchCoordinatorHandle::new(render, started_query, task)
}

/// Result of one fetch attempt, tagged with its sequence number.
struct FetchSettled {
    sequence: u64,
    query: String,
    outcome: Result<Vec<MovieSummary>, CatalogError>,
}

struct CoordinatorActor {
    provider: Arc<dyn CatalogProvider>,
    state: watch::Sender<RenderState>,
    /// Query of the most recently started fetch, published after `Loading`
    started: watch::Sender<String>,
    in_flight: JoinSet<FetchSettled>,
    /// Sequence number of the most recently started fetch
    latest: u64,
}

impl CoordinatorActor {
    async fn run(mut self, mut debounced: watch::Receiver<String>) {
        tracing::debug!("Search coordinator started");

        let initial = debounced.borrow_and_update().clone();
        self.start_fetch(initial);

        loop {
            tokio::select! {
                changed = debounced.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let query = debounced.borrow_and_update().clone();
                    self.start_fetch(query);
                }
                Some(joined) = self.in_flight.join_next() => {
                    match joined {
                        Ok(settled) => self.apply(settled),
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => tracing::error!("Fetch task failed: {e}"),
                    }
                }
            }
        }

        self.in_flight.abort_all();
        tracing::debug!(
            "Search coordinator stopped with {} fetches in flight",
            self.in_flight.len()
        );
    }

    fn start_fetch(&mut self, query: String) {
        self.latest += 1;
        let sequence = self.latest;

        self.state.send_replace(RenderState::Loading);
        tracing::debug!(sequence, "Fetching movies for query '{query}'");

        self.started.send_replace(query.clone());

        let provider = Arc::clone(&self.provider);
        self.in_flight.spawn(async move {
            let outcome = provider.fetch_movies(&query).await;
            FetchSettled {
                sequence,
                query,
                outcome,
            }
        });
    }

    fn apply(&mut self, settled: FetchSettled) {
        if settled.sequence != self.latest {
            match &settled.outcome {
                Ok(movies) => tracing::debug!(
                    sequence = settled.sequence,
                    latest = self.latest,
                    "Discarding stale result for '{}' ({} movies)",
                    settled.query,
                    movies.len()
                ),
                Err(e) => tracing::debug!(
                    sequence = settled.sequence,
                    latest = self.latest,
                    "Discarding stale failure for '{}': {e}",
                    settled.query
                ),
            }
            return;
        }

        let next = RenderState::from_outcome(&settled.query, settled.outcome);
        self.state.send_replace(next);
    }
}
