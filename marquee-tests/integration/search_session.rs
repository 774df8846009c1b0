//! Search session end to end against the fake catalog.

use std::sync::Arc;
use std::time::Duration;

use marquee_search::{RenderState, SearchSession, TmdbProvider};
use serde_json::json;

use crate::fake_catalog::{FakeCatalog, ScriptedResponse};

fn start_session(catalog: &FakeCatalog) -> SearchSession {
    let config = catalog.config();
    let provider = TmdbProvider::new(&config.catalog).unwrap();
    SearchSession::start(&config, Arc::new(provider))
}

fn titled(id: u64, title: &str) -> serde_json::Value {
    json!({"results": [{"id": id, "title": title}]})
}

#[tokio::test]
async fn test_session_starts_with_discover_listing() {
    let catalog = FakeCatalog::start().await;
    catalog.script("", ScriptedResponse::ok(titled(550, "Fight Club")));

    let session = start_session(&catalog);
    let state = session.wait_until_settled().await.unwrap();

    assert_eq!(state.movies()[0].id, 550);
    assert_eq!(catalog.requests()[0].path, "/3/discover/movie");
}

#[tokio::test]
async fn test_typing_burst_issues_single_search() {
    let catalog = FakeCatalog::start().await;
    catalog.script("dune", ScriptedResponse::ok(titled(438631, "Dune")));

    let session = start_session(&catalog);
    session.wait_until_settled().await.unwrap();

    for text in ["d", "du", "dun", "dune"] {
        session.set_query(text);
        tokio::task::yield_now().await;
    }

    let mut render = session.subscribe();
    let state = render
        .wait_for(|state| state.movies().first().is_some_and(|m| m.id == 438631))
        .await
        .unwrap()
        .clone();

    assert_eq!(state.movies().len(), 1);
    assert_eq!(catalog.search_terms(), vec!["", "dune"]);
}

#[tokio::test]
async fn test_slow_older_response_does_not_overwrite_newer() {
    let catalog = FakeCatalog::start().await;
    catalog.script(
        "old",
        ScriptedResponse::ok(titled(1, "Old")).delayed(Duration::from_millis(600)),
    );
    catalog.script(
        "new",
        ScriptedResponse::ok(titled(2, "New")).delayed(Duration::from_millis(50)),
    );

    let session = start_session(&catalog);
    session.wait_until_settled().await.unwrap();

    session.set_query("old");
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(session.render_state().is_loading());

    session.set_query("new");
    let mut render = session.subscribe();
    render
        .wait_for(|state| state.movies().first().is_some_and(|m| m.id == 2))
        .await
        .unwrap();

    // Let the older request finish; its result must be discarded
    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(catalog.search_terms(), vec!["", "old", "new"]);
    assert_eq!(session.render_state().movies()[0].id, 2);
}

#[tokio::test]
async fn test_failure_then_recovery() {
    let catalog = FakeCatalog::start().await;
    catalog.script(
        "bad",
        ScriptedResponse::status(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    );
    catalog.script("good", ScriptedResponse::ok(titled(3, "Good")));

    let session = start_session(&catalog);
    session.wait_until_settled().await.unwrap();
    let mut render = session.subscribe();

    session.set_query("bad");
    let failed = render
        .wait_for(|state| matches!(state, RenderState::Error { .. }))
        .await
        .unwrap()
        .clone();
    assert_eq!(failed.error_message(), Some("Failed to fetch movies"));

    session.set_query("good");
    render
        .wait_for(|state| state.movies().first().is_some_and(|m| m.id == 3))
        .await
        .unwrap();

    session.shutdown().await;
}
