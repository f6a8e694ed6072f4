//! Movie search state store

use crate::display_types::{Movie, MovieDetail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordering applied by [`MovieState::sorted_movies`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Title,
    /// Newest first
    Year,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Title => "title",
            SortOrder::Year => "year",
        }
    }
}

/// Unrecognized values fall back to title order.
impl From<&str> for SortOrder {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "year" => SortOrder::Year,
            _ => SortOrder::Title,
        }
    }
}

/// State for the movie search view
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieState {
    /// Current results, in upstream order
    pub movies: Vec<Movie>,
    /// Detail record for the movie being viewed
    pub selected_movie: Option<MovieDetail>,
    /// Whether a request is outstanding
    pub loading: bool,
    /// Error message if the last request failed
    pub error: Option<String>,
    /// Trimmed text of the active search
    pub search_query: String,
    /// Upstream match count (all pages)
    pub total_results: u32,
    /// True until the first successful listing; gates the welcome placeholder
    pub results_hidden: bool,
    pub selected_genre: String,
    pub sort_order: SortOrder,
    pub movie_year: String,
    pub movie_type: String,
}

impl Default for MovieState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            selected_movie: None,
            loading: false,
            error: None,
            search_query: String::new(),
            total_results: 0,
            results_hidden: true,
            selected_genre: String::new(),
            sort_order: SortOrder::default(),
            movie_year: String::new(),
            movie_type: String::new(),
        }
    }
}

impl MovieState {
    /// Back to the pre-search welcome state. Filter and sort preferences survive.
    pub fn reset_search(&mut self) {
        self.movies.clear();
        self.total_results = 0;
        self.search_query.clear();
        self.results_hidden = true;
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// A search was entered and came back with nothing. Distinct from the
    /// "no search yet" state, which has an empty query.
    pub fn is_empty(&self) -> bool {
        !self.loading && self.movies.is_empty() && !self.search_query.is_empty()
    }

    /// Copy of the results ordered by the current sort preference
    pub fn sorted_movies(&self) -> Vec<Movie> {
        let mut movies = self.movies.clone();
        sort_movies(&mut movies, self.sort_order);
        movies
    }

    /// Results after the genre, year and type filters, then sorted.
    /// Blank filters match everything.
    pub fn filtered_movies(&self) -> Vec<Movie> {
        let genre = self.selected_genre.trim();
        let year = self.movie_year.trim();
        let movie_type = self.movie_type.trim();
        let mut movies: Vec<Movie> = self
            .movies
            .iter()
            .filter(|m| {
                genre.is_empty() || m.genre_tokens().any(|g| g.eq_ignore_ascii_case(genre))
            })
            .filter(|m| year.is_empty() || year_matches(&m.year, year))
            .filter(|m| movie_type.is_empty() || m.movie_type.eq_ignore_ascii_case(movie_type))
            .cloned()
            .collect();
        sort_movies(&mut movies, self.sort_order);
        movies
    }

    /// Every distinct genre across the results, sorted
    pub fn genres(&self) -> Vec<String> {
        let genres: BTreeSet<&str> = self.movies.iter().flat_map(Movie::genre_tokens).collect();
        genres.into_iter().map(str::to_string).collect()
    }
}

fn sort_movies(movies: &mut [Movie], order: SortOrder) {
    match order {
        SortOrder::Year => {
            movies.sort_by(|a, b| leading_year(&b.year).cmp(&leading_year(&a.year)));
        }
        SortOrder::Title => {
            movies.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        }
    }
}

/// Leading integer of a year string; `"2009–2011"` gives 2009, garbage gives 0.
pub fn leading_year(year: &str) -> i32 {
    let trimmed = year.trim_start();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().unwrap_or(0)
}

/// Whether `filter` falls inside the span a year string covers. A range with
/// no end (`"2019–"`) is still running.
fn year_matches(year: &str, filter: &str) -> bool {
    let Ok(wanted) = filter.parse::<i32>() else {
        return year.trim() == filter;
    };
    let start = leading_year(year);
    if start == 0 {
        return false;
    }
    let rest = year.trim_start().trim_start_matches(|c: char| c.is_ascii_digit());
    let end = if rest.is_empty() {
        start
    } else {
        match leading_year(rest.trim_start_matches(|c: char| !c.is_ascii_digit())) {
            0 => i32::MAX,
            end => end,
        }
    };
    (start..=end).contains(&wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, year: &str, genre: Option<&str>) -> Movie {
        Movie {
            id: format!("tt-{}", title.to_lowercase().replace(' ', "-")),
            title: title.to_string(),
            year: year.to_string(),
            movie_type: "movie".to_string(),
            poster_url: None,
            genre: genre.map(str::to_string),
            rating: None,
        }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    fn state_with(movies: Vec<Movie>) -> MovieState {
        MovieState {
            movies,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state_hides_results() {
        let state = MovieState::default();
        assert!(state.results_hidden);
        assert!(!state.loading);
        assert!(!state.has_error());
        assert!(!state.is_empty());
        assert_eq!(state.sort_order, SortOrder::Title);
    }

    #[test]
    fn test_sort_order_parsing_falls_back_to_title() {
        assert_eq!(SortOrder::from("year"), SortOrder::Year);
        assert_eq!(SortOrder::from(" Year "), SortOrder::Year);
        assert_eq!(SortOrder::from("title"), SortOrder::Title);
        assert_eq!(SortOrder::from("rating"), SortOrder::Title);
        assert_eq!(SortOrder::from(""), SortOrder::Title);
    }

    #[test]
    fn test_leading_year() {
        assert_eq!(leading_year("2005"), 2005);
        assert_eq!(leading_year("2009–2011"), 2009);
        assert_eq!(leading_year("2019–"), 2019);
        assert_eq!(leading_year("N/A"), 0);
        assert_eq!(leading_year(""), 0);
    }

    #[test]
    fn test_sort_by_title_is_case_insensitive() {
        let state = state_with(vec![
            movie("batman Returns", "1992", None),
            movie("Alien", "1979", None),
            movie("Batman", "1989", None),
        ]);
        assert_eq!(
            titles(&state.sorted_movies()),
            vec!["Alien", "Batman", "batman Returns"]
        );
    }

    #[test]
    fn test_sort_does_not_mutate_state() {
        let state = state_with(vec![movie("B", "2000", None), movie("A", "2001", None)]);
        let _ = state.sorted_movies();
        assert_eq!(titles(&state.movies), vec!["B", "A"]);
    }

    #[test]
    fn test_sort_by_year_descending_and_stable() {
        let mut state = state_with(vec![
            movie("Old", "1989", None),
            movie("Series", "2009–2011", None),
            movie("Unknown", "N/A", None),
            movie("Tie A", "2009", None),
            movie("New", "2022", None),
        ]);
        state.sort_order = SortOrder::Year;
        assert_eq!(
            titles(&state.sorted_movies()),
            vec!["New", "Series", "Tie A", "Old", "Unknown"]
        );
    }

    #[test]
    fn test_genres_union() {
        let state = state_with(vec![
            movie("One", "2000", Some("Action, Drama")),
            movie("Two", "2001", Some("Drama, Comedy")),
            movie("Three", "2002", None),
        ]);
        assert_eq!(state.genres(), vec!["Action", "Comedy", "Drama"]);
    }

    #[test]
    fn test_is_empty_needs_a_query() {
        let mut state = MovieState::default();
        assert!(!state.is_empty());

        state.search_query = "qwzx".to_string();
        assert!(state.is_empty());

        state.loading = true;
        assert!(!state.is_empty());
    }

    #[test]
    fn test_reset_search_keeps_preferences() {
        let mut state = state_with(vec![movie("A", "2000", None)]);
        state.total_results = 1;
        state.search_query = "a".to_string();
        state.results_hidden = false;
        state.sort_order = SortOrder::Year;

        state.reset_search();
        assert!(state.movies.is_empty());
        assert_eq!(state.total_results, 0);
        assert!(state.search_query.is_empty());
        assert!(state.results_hidden);
        assert_eq!(state.sort_order, SortOrder::Year);
    }

    #[test]
    fn test_filters_apply_before_sort() {
        let mut state = state_with(vec![
            movie("Heat", "1995", Some("Action, Crime, Drama")),
            movie("Airplane!", "1980", Some("Comedy")),
            movie("Alien", "1979", Some("Horror, Sci-Fi")),
            movie("Aliens", "1986", Some("Action, Sci-Fi")),
        ]);
        state.selected_genre = "action".to_string();
        assert_eq!(titles(&state.filtered_movies()), vec!["Aliens", "Heat"]);

        state.selected_genre.clear();
        state.movie_year = "1980".to_string();
        assert_eq!(titles(&state.filtered_movies()), vec!["Airplane!"]);
    }

    #[test]
    fn test_year_filter_covers_ranges() {
        let mut series = movie("Lost", "2004–2010", None);
        series.movie_type = "series".to_string();
        let mut running = movie("Running", "2019–", None);
        running.movie_type = "series".to_string();
        let mut state = state_with(vec![series, running, movie("Film", "2007", None)]);

        state.movie_year = "2007".to_string();
        assert_eq!(titles(&state.filtered_movies()), vec!["Film", "Lost"]);

        state.movie_year = "2024".to_string();
        assert_eq!(titles(&state.filtered_movies()), vec!["Running"]);

        state.movie_year.clear();
        state.movie_type = "Series".to_string();
        assert_eq!(titles(&state.filtered_movies()), vec!["Lost", "Running"]);
    }

    #[test]
    fn test_state_serializes_for_presentation() {
        let state = state_with(vec![movie("Alien", "1979", None)]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["movies"][0]["title"], "Alien");
        assert_eq!(json["sort_order"], "title");
        assert_eq!(json["results_hidden"], true);
    }

    #[test]
    fn test_sort_order_json_matches_cli_values() {
        for order in [SortOrder::Title, SortOrder::Year] {
            let json = serde_json::to_value(order).unwrap();
            assert_eq!(json, order.as_str());
            assert_eq!(SortOrder::from(json.as_str().unwrap()), order);
            let parsed: SortOrder = serde_json::from_value(json).unwrap();
            assert_eq!(parsed, order);
        }
    }
}
