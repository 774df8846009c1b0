//! TMDB provider behavior against the fake catalog.

use axum::http::StatusCode;
use marquee_search::{CatalogError, CatalogProvider, RenderState, TmdbProvider};
use serde_json::json;

use crate::fake_catalog::{FakeCatalog, ScriptedResponse};

fn provider_for(catalog: &FakeCatalog) -> TmdbProvider {
    TmdbProvider::new(&catalog.config().catalog).unwrap()
}

#[tokio::test]
async fn test_empty_query_calls_discover() {
    let catalog = FakeCatalog::start().await;

    provider_for(&catalog).fetch_movies("").await.unwrap();

    let requests = catalog.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/3/discover/movie");
    assert_eq!(
        requests[0].raw_query.as_deref(),
        Some("sort_by=popularity.desc")
    );
}

#[tokio::test]
async fn test_query_calls_search_url_encoded() {
    let catalog = FakeCatalog::start().await;

    provider_for(&catalog)
        .fetch_movies("Tom & Jerry")
        .await
        .unwrap();

    let requests = catalog.requests();
    assert_eq!(requests[0].path, "/3/search/movie");
    assert_eq!(
        requests[0].raw_query.as_deref(),
        Some("query=Tom%20%26%20Jerry&sort_by=popularity.desc")
    );
    assert_eq!(requests[0].search_term, "Tom & Jerry");
}

#[tokio::test]
async fn test_sends_json_accept_and_bearer_token() {
    let catalog = FakeCatalog::start().await;

    provider_for(&catalog).fetch_movies("heat").await.unwrap();

    let request = &catalog.requests()[0];
    assert_eq!(request.accept.as_deref(), Some("application/json"));
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-api-key"));
}

#[tokio::test]
async fn test_not_found_is_generic_failure() {
    let catalog = FakeCatalog::start().await;
    catalog.script("missing", ScriptedResponse::status(StatusCode::NOT_FOUND));

    let outcome = provider_for(&catalog).fetch_movies("missing").await;
    assert!(matches!(outcome, Err(CatalogError::Status { status: 404 })));

    let state = RenderState::from_outcome("missing", outcome);
    assert_eq!(state.error_message(), Some("Failed to fetch movies"));
    assert!(state.movies().is_empty());
}

#[tokio::test]
async fn test_rejection_uses_catalog_message() {
    let catalog = FakeCatalog::start().await;
    catalog.script(
        "nothing",
        ScriptedResponse::ok(json!({"results": [], "response": "False", "Error": "No results"})),
    );

    let outcome = provider_for(&catalog).fetch_movies("nothing").await;
    let state = RenderState::from_outcome("nothing", outcome);

    assert_eq!(
        state,
        RenderState::Error {
            message: "No results".to_string()
        }
    );
}

#[tokio::test]
async fn test_results_are_ready_in_order() {
    let catalog = FakeCatalog::start().await;
    catalog.script(
        "ab",
        ScriptedResponse::ok(json!({
            "page": 1,
            "results": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}],
            "total_results": 2
        })),
    );

    let movies = provider_for(&catalog).fetch_movies("ab").await.unwrap();

    let keyed: Vec<(u64, &str)> = movies.iter().map(|m| (m.id, m.title.as_str())).collect();
    assert_eq!(keyed, vec![(1, "A"), (2, "B")]);
}

#[tokio::test]
async fn test_null_fields_keep_the_rest_of_the_page() {
    let catalog = FakeCatalog::start().await;
    catalog.script(
        "",
        ScriptedResponse::ok(json!({
            "results": [
                {"id": 1, "title": "A", "poster_path": null},
                {"id": 2, "title": null, "release_date": null}
            ]
        })),
    );

    let movies = provider_for(&catalog).fetch_movies("").await.unwrap();

    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].poster_path, None);
    assert_eq!(movies[1].title, "");
    assert_eq!(
        serde_json::to_value(&movies[0]).unwrap(),
        json!({"id": 1, "title": "A", "poster_path": null})
    );
}

#[tokio::test]
async fn test_missing_results_is_empty_list() {
    let catalog = FakeCatalog::start().await;
    catalog.script("", ScriptedResponse::ok(json!({"page": 1})));

    let movies = provider_for(&catalog).fetch_movies("").await.unwrap();
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_malformed_json_asks_to_retry() {
    let catalog = FakeCatalog::start().await;
    catalog.script("broken", ScriptedResponse::raw("<html>oops</html>"));

    let outcome = provider_for(&catalog).fetch_movies("broken").await;
    assert!(matches!(outcome, Err(CatalogError::Parse { .. })));

    let state = RenderState::from_outcome("broken", outcome);
    assert_eq!(
        state.error_message(),
        Some("Failed to fetch movies. Please try again later.")
    );
}

#[tokio::test]
async fn test_missing_api_key_is_rejected_by_catalog() {
    let catalog = FakeCatalog::start().await;
    catalog.script("", ScriptedResponse::status(StatusCode::UNAUTHORIZED));

    let mut config = catalog.config();
    config.catalog.api_key = None;
    let provider = TmdbProvider::new(&config.catalog).unwrap();

    let outcome = provider.fetch_movies("").await;
    assert!(matches!(outcome, Err(CatalogError::Status { status: 401 })));
    assert_eq!(
        catalog.requests()[0].authorization.as_deref().map(str::trim),
        Some("Bearer")
    );
}
