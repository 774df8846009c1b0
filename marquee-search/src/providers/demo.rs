//! Demo provider implementation for development without an API key.

use async_trait::async_trait;

use super::CatalogProvider;
use crate::errors::CatalogError;
use crate::types::MovieSummary;

/// Demo provider serving a small built-in catalog.
///
/// An empty query lists every movie by descending popularity; otherwise
/// movies whose title contains the query (case-insensitive) are returned in
/// the same order. A query matching nothing is rejected the way the catalog
/// rejects unknown titles.
#[derive(Debug)]
pub struct DemoProvider {
    movies: Vec<MovieSummary>,
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoProvider {
    /// Creates a demo provider with the built-in catalog.
    pub fn new() -> Self {
        let mut movies = vec![
            demo_movie(603, "The Matrix", "1999-03-30", 8.2, 98.1, "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"),
            demo_movie(27205, "Inception", "2010-07-15", 8.4, 120.4, "/ljsZTbVsrQSqZgWeep2B1QiDKuh.jpg"),
            demo_movie(157336, "Interstellar", "2014-11-05", 8.4, 140.2, "/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg"),
            demo_movie(438631, "Dune", "2021-09-15", 7.8, 110.7, "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"),
            demo_movie(693134, "Dune: Part Two", "2024-02-27", 8.2, 180.3, "/1pdfLvkbY9ohJlCjQH2CZjjYVvJ.jpg"),
            demo_movie(78, "Blade Runner", "1982-06-25", 7.9, 45.6, "/63N9uy8nd9j7Eog2axPQ8lbr3Wj.jpg"),
            demo_movie(335984, "Blade Runner 2049", "2017-10-04", 7.6, 60.9, "/gajva2L0rPYkEWjzgFlBXCAVBE5.jpg"),
        ];
        movies.sort_by(|a, b| {
            b.popularity
                .unwrap_or_default()
                .total_cmp(&a.popularity.unwrap_or_default())
        });

        Self { movies }
    }
}

fn demo_movie(
    id: u64,
    title: &str,
    release_date: &str,
    vote_average: f64,
    popularity: f64,
    poster_path: &str,
) -> MovieSummary {
    MovieSummary {
        release_date: Some(release_date.to_string()),
        vote_average: Some(vote_average),
        popularity: Some(popularity),
        poster_path: Some(poster_path.to_string()),
        original_language: Some("en".to_string()),
        ..MovieSummary::new(id, title)
    }
}

#[async_trait]
impl CatalogProvider for DemoProvider {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<MovieSummary>, CatalogError> {
        if query.is_empty() {
            return Ok(self.movies.clone());
        }

        let needle = query.to_lowercase();
        let matches: Vec<MovieSummary> = self
            .movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        if matches.is_empty() {
            return Err(CatalogError::Rejected {
                message: Some("Movie not found!".to_string()),
            });
        }

        Ok(matches)
    }
}
