//! Data types exchanged with the movie catalog.

use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CatalogError;

/// One movie as returned by the catalog.
///
/// The fields a movie card needs are typed; everything else the catalog sends
/// is kept in `extra`. Fields that are present but `null`, or of an unexpected
/// type, leave their typed counterpart unset and stay in `extra` as sent, so
/// serializing the record writes them back unchanged. A record without a
/// title is written back with an empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct MovieSummary {
    /// Catalog identifier, stable key for list rendering
    pub id: u64,
    /// Display title, empty when the catalog has none
    pub title: String,
    /// Path of the poster image relative to the image base URL
    pub poster_path: Option<String>,
    /// Release date as `YYYY-MM-DD`
    pub release_date: Option<String>,
    /// Average user rating on a 0-10 scale
    pub vote_average: Option<f64>,
    /// ISO 639-1 code of the original language
    pub original_language: Option<String>,
    /// Plot summary
    pub overview: Option<String>,
    /// Catalog popularity score
    pub popularity: Option<f64>,
    /// Any other fields sent by the catalog
    pub extra: Map<String, Value>,
}

/// Removes `key` from `fields` if its value reads as a `T`.
fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let typed = T::deserialize(fields.get(key)?).ok()?;
    fields.remove(key);
    Some(typed)
}

impl TryFrom<Map<String, Value>> for MovieSummary {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = take_field(&mut fields, "id")
            .ok_or_else(|| "movie record has no numeric id".to_string())?;

        Ok(Self {
            id,
            title: take_field(&mut fields, "title").unwrap_or_default(),
            poster_path: take_field(&mut fields, "poster_path"),
            release_date: take_field(&mut fields, "release_date"),
            vote_average: take_field(&mut fields, "vote_average"),
            original_language: take_field(&mut fields, "original_language"),
            overview: take_field(&mut fields, "overview"),
            popularity: take_field(&mut fields, "popularity"),
            extra: fields,
        })
    }
}

impl From<MovieSummary> for Map<String, Value> {
    fn from(movie: MovieSummary) -> Self {
        let mut fields = movie.extra;
        fields.insert("id".to_string(), Value::from(movie.id));

        // An untyped title left in `extra` (e.g. null) wins over the empty default
        if !movie.title.is_empty() || !fields.contains_key("title") {
            fields.insert("title".to_string(), Value::String(movie.title));
        }

        let optional = [
            ("poster_path", movie.poster_path.map(Value::String)),
            ("release_date", movie.release_date.map(Value::String)),
            ("vote_average", movie.vote_average.map(Value::from)),
            ("original_language", movie.original_language.map(Value::String)),
            ("overview", movie.overview.map(Value::String)),
            ("popularity", movie.popularity.map(Value::from)),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        }

        fields
    }
}

impl MovieSummary {
    /// Creates a summary with only an id and title set.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            release_date: None,
            vote_average: None,
            original_language: None,
            overview: None,
            popularity: None,
            extra: Map::new(),
        }
    }

    /// Full poster URL under `image_base_url`, if the movie has a poster.
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{path}", image_base_url.trim_end_matches('/')))
    }

    /// Release year parsed from the release date.
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }

    /// Rating with one decimal, or `N/A` when the movie is unrated.
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(rating) if rating > 0.0 => format!("{rating:.1}"),
            _ => "N/A".to_string(),
        }
    }

    /// Original language code, or `N/A` when unknown.
    pub fn language_label(&self) -> &str {
        self.original_language
            .as_deref()
            .filter(|lang| !lang.is_empty())
            .unwrap_or("N/A")
    }
}

/// Body of a catalog search or discover response.
///
/// Every field is optional; absent results are treated as an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    /// Movies matching the request
    #[serde(default)]
    pub results: Option<Vec<MovieSummary>>,
    /// Application-level status flag, `"False"` on failure
    #[serde(default, alias = "Response")]
    pub response: Option<Value>,
    /// Error message accompanying a failure flag
    #[serde(default, rename = "Error")]
    pub error: Option<String>,
}

impl CatalogResponse {
    /// Checks if the body flags an application-level failure.
    ///
    /// Accepts the string `"False"` in any case as well as boolean `false`.
    pub fn signals_failure(&self) -> bool {
        match &self.response {
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("false"),
            Some(Value::Bool(flag)) => !flag,
            _ => false,
        }
    }

    /// Converts the body into the movie list it carries.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Rejected` - If the body flags an application-level failure
    pub fn into_movies(self) -> crate::Result<Vec<MovieSummary>> {
        if self.signals_failure() {
            return Err(CatalogError::Rejected {
                message: self.error,
            });
        }

        Ok(self.results.unwrap_or_default())
    }
}
