//! Conversions from OMDb wire records to UI display types

use marquee_core::omdb::{OmdbMovie, OmdbMovieDetail};
use marquee_ui::display_types::{Movie, MovieDetail};

/// OMDb uses `"N/A"` for missing posters
fn poster_url(poster: &str) -> Option<String> {
    match poster.trim() {
        "" | "N/A" => None,
        url => Some(url.to_string()),
    }
}

pub fn movie_from_omdb(movie: OmdbMovie) -> Movie {
    Movie {
        poster_url: poster_url(&movie.poster),
        id: movie.imdb_id,
        title: movie.title,
        year: movie.year,
        movie_type: movie.movie_type,
        genre: movie.genre,
        rating: movie.imdb_rating,
    }
}

pub fn detail_from_omdb(detail: OmdbMovieDetail) -> MovieDetail {
    MovieDetail {
        movie: movie_from_omdb(detail.movie),
        plot: detail.plot,
        rated: detail.rated,
        released: detail.released,
        runtime: detail.runtime,
        director: detail.director,
        writer: detail.writer,
        actors: detail.actors,
        language: detail.language,
        country: detail.country,
        awards: detail.awards,
        metascore: detail.metascore,
        votes: detail.imdb_votes,
        box_office: detail.box_office,
    }
}
