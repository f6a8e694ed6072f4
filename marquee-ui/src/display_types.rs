//! Display types for UI components
//!
//! Lightweight versions of the OMDb wire records, containing only the fields
//! needed for display.

use serde::{Deserialize, Serialize};

/// Movie display info (one search result card)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// IMDb id, e.g. `tt0372784`
    pub id: String,
    pub title: String,
    /// Release year as upstream reports it; may be a range (`"2009–2011"`)
    pub year: String,
    /// `movie`, `series` or `episode`
    pub movie_type: String,
    pub poster_url: Option<String>,
    /// Comma-separated genres, when known
    pub genre: Option<String>,
    pub rating: Option<String>,
}

impl Movie {
    /// Individual genre tokens from the comma-separated `genre` field
    pub fn genre_tokens(&self) -> impl Iterator<Item = &str> {
        self.genre
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}

/// Full detail view for a selected movie
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub movie: Movie,
    pub plot: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub metascore: Option<String>,
    pub votes: Option<String>,
    pub box_office: Option<String>,
}
