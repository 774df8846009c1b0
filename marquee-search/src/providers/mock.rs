//! Scripted provider implementation for testing.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::CatalogProvider;
use crate::errors::CatalogError;
use crate::types::MovieSummary;

/// Outcome a scripted query resolves to.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Resolve successfully with these movies
    Movies(Vec<MovieSummary>),
    /// Fail with this HTTP status
    Status(u16),
    /// Fail with a catalog rejection carrying this message
    Rejected(Option<String>),
    /// Fail with a transport error
    Network,
}

/// Provider answering each query after a scripted delay.
///
/// Unscripted queries resolve immediately to an empty list.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    scripts: HashMap<String, (Duration, ScriptedOutcome)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    /// Creates a provider with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `query` to resolve to `outcome` after `delay`.
    pub fn with(mut self, query: &str, delay: Duration, outcome: ScriptedOutcome) -> Self {
        self.scripts.insert(query.to_string(), (delay, outcome));
        self
    }

    /// Queries fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CatalogProvider for ScriptedProvider {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        self.calls.lock().push(query.to_string());

        let (delay, outcome) = self
            .scripts
            .get(query)
            .cloned()
            .unwrap_or((Duration::ZERO, ScriptedOutcome::Movies(Vec::new())));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match outcome {
            ScriptedOutcome::Movies(movies) => Ok(movies),
            ScriptedOutcome::Status(status) => Err(CatalogError::Status { status }),
            ScriptedOutcome::Rejected(message) => Err(CatalogError::Rejected { message }),
            ScriptedOutcome::Network => Err(CatalogError::Network {
                reason: "connection reset".to_string(),
            }),
        }
    }
}
