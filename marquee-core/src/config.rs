//! Centralized configuration for Marquee.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use crate::MarqueeError;

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
}

/// Movie catalog API configuration.
///
/// Controls where catalog requests go and how they authenticate.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without trailing slash
    pub base_url: String,
    /// Bearer token sent with every request (None = unauthenticated)
    pub api_key: Option<String>,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
    /// Prefix joined with a movie's poster path to form an image URL
    pub image_base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key: None,
            user_agent: "marquee/0.1.0",
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
        }
    }
}

/// Search input behavior configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period the query must hold before a fetch is issued
    pub debounce_quiet: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_quiet: Duration::from_millis(500),
        }
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration with overrides resolved through `lookup`.
    ///
    /// Unparseable numeric values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Catalog configuration overrides
        config.catalog.api_key = lookup("MARQUEE_API_KEY")
            .or_else(|| lookup("TMDB_API_KEY"))
            .filter(|key| !key.trim().is_empty());

        if let Some(base_url) = lookup("MARQUEE_BASE_URL") {
            config.catalog.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(image_base_url) = lookup("MARQUEE_IMAGE_BASE_URL") {
            config.catalog.image_base_url = image_base_url.trim_end_matches('/').to_string();
        }

        // Search configuration overrides
        if let Some(debounce) = lookup("MARQUEE_DEBOUNCE_MS") {
            match debounce.parse::<u64>() {
                Ok(millis) => config.search.debounce_quiet = Duration::from_millis(millis),
                Err(e) => tracing::warn!("Ignoring MARQUEE_DEBOUNCE_MS={debounce}: {e}"),
            }
        }

        config
    }

    /// Creates a configuration optimized for testing.
    ///
    /// Points at a local catalog and shortens the debounce period.
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            catalog: CatalogConfig {
                base_url: base_url.into(),
                api_key: Some("test-api-key".to_string()),
                ..Default::default()
            },
            search: SearchConfig {
                debounce_quiet: Duration::from_millis(20),
            },
        }
    }

    /// Checks that the configuration can be used to reach a catalog.
    ///
    /// # Errors
    ///
    /// - `MarqueeError::Configuration` - If the base URL is not an absolute http(s) URL
    pub fn validate(&self) -> crate::Result<()> {
        let parsed =
            url::Url::parse(&self.catalog.base_url).map_err(|e| MarqueeError::Configuration {
                reason: format!("invalid catalog base URL '{}': {e}", self.catalog.base_url),
            })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MarqueeError::Configuration {
                reason: format!(
                    "catalog base URL must use http or https, got '{}'",
                    parsed.scheme()
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = MarqueeConfig::default();

        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.api_key, None);
        assert_eq!(config.search.debounce_quiet, Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = MarqueeConfig::from_lookup(lookup_from(&[
            ("MARQUEE_API_KEY", "secret"),
            ("MARQUEE_BASE_URL", "http://localhost:9000/3/"),
            ("MARQUEE_DEBOUNCE_MS", "250"),
        ]));

        assert_eq!(config.catalog.api_key.as_deref(), Some("secret"));
        assert_eq!(config.catalog.base_url, "http://localhost:9000/3");
        assert_eq!(config.search.debounce_quiet, Duration::from_millis(250));
    }

    #[test]
    fn test_tmdb_key_fallback() {
        let config = MarqueeConfig::from_lookup(lookup_from(&[("TMDB_API_KEY", "legacy")]));
        assert_eq!(config.catalog.api_key.as_deref(), Some("legacy"));

        let blank = MarqueeConfig::from_lookup(lookup_from(&[("MARQUEE_API_KEY", "  ")]));
        assert_eq!(blank.catalog.api_key, None);
    }

    #[test]
    fn test_invalid_debounce_falls_back_to_default() {
        let config =
            MarqueeConfig::from_lookup(lookup_from(&[("MARQUEE_DEBOUNCE_MS", "soon")]));
        assert_eq!(config.search.debounce_quiet, Duration::from_millis(500));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = MarqueeConfig::default();

        config.catalog.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(MarqueeError::Configuration { .. })
        ));

        config.catalog.base_url = "ftp://example.com/3".to_string();
        assert!(config.validate().is_err());

        config.catalog.base_url = "http://127.0.0.1:8080".to_string();
        assert!(config.validate().is_ok());
    }
}
