//! TMDB catalog provider for production use.

use async_trait::async_trait;
use marquee_core::CatalogConfig;
use reqwest::header::ACCEPT;

use super::CatalogProvider;
use crate::endpoint::CatalogEndpoint;
use crate::errors::CatalogError;
use crate::types::{CatalogResponse, MovieSummary};

/// Catalog provider backed by the TMDB v3 HTTP API.
///
/// Sends one GET per query with a JSON accept header and bearer
/// authorization. No retries and no request timeout.
#[derive(Debug, Clone)]
pub struct TmdbProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TmdbProvider {
    /// Creates a provider from catalog configuration.
    ///
    /// # Errors
    ///
    /// - `CatalogError::InvalidBaseUrl` - If the base URL does not parse
    /// - `CatalogError::Network` - If the HTTP client cannot be built
    pub fn new(config: &CatalogConfig) -> crate::Result<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| CatalogError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| CatalogError::Network {
                reason: format!("HTTP client creation failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL requests are sent under.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogProvider for TmdbProvider {
    async fn fetch_movies(&self, query: &str) -> crate::Result<Vec<MovieSummary>> {
        let endpoint = CatalogEndpoint::for_query(query);
        let url = endpoint.url(&self.base_url);

        tracing::debug!(endpoint = endpoint.kind(), "GET {url}");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(self.api_key.as_deref().unwrap_or_default())
            .send()
            .await
            .map_err(|e| CatalogError::Network {
                reason: format!("Catalog request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network {
                reason: format!("Reading catalog response failed: {e}"),
            })?;

        let catalog_response: CatalogResponse =
            serde_json::from_slice(&body).map_err(|e| CatalogError::Parse {
                reason: format!("Catalog JSON parsing failed: {e}"),
            })?;

        catalog_response.into_movies()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unparseable_base_url() {
        let config = CatalogConfig {
            base_url: "::not-a-url".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            TmdbProvider::new(&config),
            Err(CatalogError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = CatalogConfig {
            base_url: "http://127.0.0.1:9/3/".to_string(),
            ..Default::default()
        };

        let provider = TmdbProvider::new(&config).unwrap();
        assert_eq!(provider.base_url(), "http://127.0.0.1:9/3");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_network_error() {
        // Port 9 (discard) is not expected to accept HTTP connections locally
        let config = CatalogConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let provider = TmdbProvider::new(&config).unwrap();

        let err = provider.fetch_movies("anything").await.unwrap_err();
        assert!(matches!(err, CatalogError::Network { .. }));
    }
}
