//! Plain-text rendering of store snapshots

use marquee_ui::display_types::{Movie, MovieDetail};
use marquee_ui::stores::MovieState;
use std::fmt::Write;

const WELCOME: &str = "Search for a movie to get started.";

/// Result list view: error, empty state, welcome placeholder, or the
/// filtered and sorted movies.
pub fn render_results(state: &MovieState) -> String {
    if let Some(error) = &state.error {
        return format!("Error: {}\n", error);
    }
    if state.is_empty() {
        return format!("No movies found for \"{}\".\n", state.search_query);
    }
    if state.results_hidden {
        return format!("{}\n", WELCOME);
    }
    let movies = state.filtered_movies();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Showing {} of {} result(s), sorted by {}",
        movies.len(),
        state.total_results,
        state.sort_order.as_str()
    );
    for movie in &movies {
        out.push_str(&render_movie_line(movie));
    }
    out
}

fn render_movie_line(movie: &Movie) -> String {
    format!(
        "{:<12} {:<11} {:<8} {}\n",
        movie.id, movie.year, movie.movie_type, movie.title
    )
}

pub fn render_detail(state: &MovieState) -> String {
    match (&state.selected_movie, &state.error) {
        (Some(detail), _) => render_detail_fields(detail),
        (None, Some(error)) => format!("Error: {}\n", error),
        (None, None) => "No movie selected.\n".to_string(),
    }
}

fn render_detail_fields(detail: &MovieDetail) -> String {
    let movie = &detail.movie;
    let mut out = format!("{} ({})\n", movie.title, movie.year);
    let fields = [
        ("IMDb", Some(&movie.id)),
        ("Type", Some(&movie.movie_type)),
        ("Rating", movie.rating.as_ref()),
        ("Rated", detail.rated.as_ref()),
        ("Released", detail.released.as_ref()),
        ("Runtime", detail.runtime.as_ref()),
        ("Genre", movie.genre.as_ref()),
        ("Director", detail.director.as_ref()),
        ("Writer", detail.writer.as_ref()),
        ("Actors", detail.actors.as_ref()),
        ("Language", detail.language.as_ref()),
        ("Country", detail.country.as_ref()),
        ("Awards", detail.awards.as_ref()),
        ("Metascore", detail.metascore.as_ref()),
        ("Votes", detail.votes.as_ref()),
        ("Box office", detail.box_office.as_ref()),
        ("Poster", movie.poster_url.as_ref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value.filter(|v| v.as_str() != "N/A") {
            let _ = writeln!(out, "{:<11} {}", format!("{}:", label), value);
        }
    }
    if let Some(plot) = &detail.plot {
        let _ = write!(out, "\n{}\n", plot);
    }
    out
}

pub fn render_genres(state: &MovieState) -> String {
    if let Some(error) = &state.error {
        return format!("Error: {}\n", error);
    }
    let genres = state.genres();
    if genres.is_empty() {
        return "No genres in the current results.\n".to_string();
    }
    genres.into_iter().map(|g| g + "\n").collect()
}
