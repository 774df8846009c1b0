//! In-process fake movie catalog for integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use marquee_core::MarqueeConfig;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Response the fake catalog gives for one search term.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl ScriptedResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: r#"{"status_message":"The resource you requested could not be found."}"#
                .to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// One request as seen by the fake catalog.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub raw_query: Option<String>,
    pub search_term: String,
    pub accept: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct CatalogState {
    scripts: Mutex<HashMap<String, ScriptedResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Fake catalog bound to an ephemeral local port.
///
/// Responses are scripted per search term; the discover listing is the empty
/// term. Unscripted terms answer `{"results": []}`.
pub struct FakeCatalog {
    address: SocketAddr,
    state: Arc<CatalogState>,
    task: JoinHandle<()>,
}

impl FakeCatalog {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake catalog");
        let address = listener.local_addr().expect("fake catalog address");
        let state = Arc::new(CatalogState::default());

        let router = Router::new()
            .fallback(handle_request)
            .with_state(Arc::clone(&state));

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::debug!("Fake catalog stopped: {e}");
            }
        });

        tracing::debug!("Fake catalog listening on {address}");
        Self {
            address,
            state,
            task,
        }
    }

    /// Base URL of the fake, including the API version segment.
    pub fn base_url(&self) -> String {
        format!("http://{}/3", self.address)
    }

    /// Configuration pointing at this fake.
    pub fn config(&self) -> MarqueeConfig {
        MarqueeConfig::for_testing(self.base_url())
    }

    pub fn script(&self, search_term: &str, response: ScriptedResponse) {
        self.state
            .scripts
            .lock()
            .insert(search_term.to_string(), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn search_terms(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|request| request.search_term)
            .collect()
    }
}

impl Drop for FakeCatalog {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle_request(
    State(state): State<Arc<CatalogState>>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    let search_term = params.get("query").cloned().unwrap_or_default();
    state.requests.lock().push(RecordedRequest {
        path: uri.path().to_string(),
        raw_query: uri.query().map(str::to_string),
        search_term: search_term.clone(),
        accept: header(ACCEPT),
        authorization: header(AUTHORIZATION),
    });

    let scripted = state.scripts.lock().get(&search_term).cloned();
    let response =
        scripted.unwrap_or_else(|| ScriptedResponse::ok(serde_json::json!({ "results": [] })));

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    (
        response.status,
        [(CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}
