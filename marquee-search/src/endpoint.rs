//! Catalog endpoint selection.

/// Sort order requested from the catalog for every listing.
pub const SORT_BY_POPULARITY: &str = "popularity.desc";

/// Catalog endpoint chosen for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEndpoint {
    /// Full-text movie search for a non-empty query.
    Search {
        /// The raw query text
        query: String,
    },
    /// Browse-all listing used when there is no query.
    Discover,
}

impl CatalogEndpoint {
    /// Picks the endpoint for `query`: search when non-empty, discover otherwise.
    ///
    /// The query is used as given; whitespace is not trimmed.
    pub fn for_query(query: &str) -> Self {
        if query.is_empty() {
            CatalogEndpoint::Discover
        } else {
            CatalogEndpoint::Search {
                query: query.to_string(),
            }
        }
    }

    /// Builds the request URL under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            CatalogEndpoint::Search { query } => format!(
                "{base}/search/movie?query={}&sort_by={SORT_BY_POPULARITY}",
                urlencoding::encode(query)
            ),
            CatalogEndpoint::Discover => {
                format!("{base}/discover/movie?sort_by={SORT_BY_POPULARITY}")
            }
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogEndpoint::Search { .. } => "search",
            CatalogEndpoint::Discover => "discover",
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const BASE: &str = "https://api.themoviedb.org/3";

    #[test]
    fn test_empty_query_uses_discover() {
        let endpoint = CatalogEndpoint::for_query("");
        assert_eq!(endpoint, CatalogEndpoint::Discover);
        assert_eq!(
            endpoint.url(BASE),
            "https://api.themoviedb.org/3/discover/movie?sort_by=popularity.desc"
        );
    }

    #[test]
    fn test_query_uses_encoded_search() {
        let endpoint = CatalogEndpoint::for_query("Tom & Jerry?");
        assert_eq!(
            endpoint.url(BASE),
            "https://api.themoviedb.org/3/search/movie?query=Tom%20%26%20Jerry%3F&sort_by=popularity.desc"
        );
    }

    #[test]
    fn test_whitespace_query_still_searches() {
        assert_eq!(
            CatalogEndpoint::for_query(" ").url("http://localhost:8080/"),
            "http://localhost:8080/search/movie?query=%20&sort_by=popularity.desc"
        );
    }

    proptest! {
        #[test]
        fn search_url_carries_query_verbatim(query in "\\PC{1,40}") {
            let url = url::Url::parse(&CatalogEndpoint::for_query(&query).url(BASE)).unwrap();
            let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

            prop_assert_eq!(url.path(), "/3/search/movie");
            prop_assert_eq!(
                pairs,
                vec![
                    ("query".to_string(), query.clone()),
                    ("sort_by".to_string(), SORT_BY_POPULARITY.to_string()),
                ]
            );
        }
    }
}
