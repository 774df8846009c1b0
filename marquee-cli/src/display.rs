//! Plain-text rendering of search results.

use marquee_search::{MovieSummary, RenderState};

/// Print the render state for `query` to stdout.
pub fn print_state(query: &str, state: &RenderState, image_base_url: &str) {
    for line in render_lines(query, state, image_base_url) {
        println!("{line}");
    }
}

fn render_lines(query: &str, state: &RenderState, image_base_url: &str) -> Vec<String> {
    match state {
        RenderState::Loading => vec!["Loading...".to_string()],
        RenderState::Error { message } => vec![format!("Error: {message}")],
        RenderState::Ready { movies } => {
            let heading = if query.is_empty() {
                "All Movies".to_string()
            } else {
                format!("Results for \"{query}\"")
            };

            let mut lines = vec![heading];
            if movies.is_empty() {
                lines.push("  (no movies)".to_string());
            }
            lines.extend(movies.iter().map(|movie| format_card(movie, image_base_url)));
            lines
        }
    }
}

/// One-line card: title, rating, language, year and poster.
fn format_card(movie: &MovieSummary, image_base_url: &str) -> String {
    let year = movie
        .release_year()
        .map_or_else(|| "N/A".to_string(), |year| year.to_string());

    let mut card = format!(
        "  [{}] {} | rating {} | {} | {}",
        movie.id,
        movie.title,
        movie.rating_label(),
        movie.language_label(),
        year
    );

    if let Some(poster) = movie.poster_url(image_base_url) {
        card.push_str(&format!(" | {poster}"));
    }

    card
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    #[test]
    fn test_card_with_all_fields() {
        let movie = MovieSummary {
            vote_average: Some(8.2),
            original_language: Some("en".to_string()),
            release_date: Some("1999-03-30".to_string()),
            poster_path: Some("/matrix.jpg".to_string()),
            ..MovieSummary::new(603, "The Matrix")
        };

        assert_eq!(
            format_card(&movie, IMAGE_BASE),
            "  [603] The Matrix | rating 8.2 | en | 1999 | https://image.tmdb.org/t/p/w500/matrix.jpg"
        );
    }

    #[test]
    fn test_card_without_optional_fields() {
        assert_eq!(
            format_card(&MovieSummary::new(1, "A"), IMAGE_BASE),
            "  [1] A | rating N/A | N/A | N/A"
        );
    }

    #[test]
    fn test_state_lines() {
        assert_eq!(
            render_lines("x", &RenderState::Loading, IMAGE_BASE),
            vec!["Loading..."]
        );
        assert_eq!(
            render_lines(
                "x",
                &RenderState::Error {
                    message: "No results".to_string()
                },
                IMAGE_BASE
            ),
            vec!["Error: No results"]
        );

        let ready = RenderState::Ready {
            movies: vec![MovieSummary::new(1, "A"), MovieSummary::new(2, "B")],
        };
        let lines = render_lines("", &ready, IMAGE_BASE);
        assert_eq!(lines[0], "All Movies");
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("  [2] B"));

        let empty = RenderState::Ready { movies: Vec::new() };
        assert_eq!(
            render_lines("zzz", &empty, IMAGE_BASE),
            vec!["Results for \"zzz\"", "  (no movies)"]
        );
    }
}
