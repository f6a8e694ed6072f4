use serde::Deserialize;

/// A movie as it appears in OMDb search results.
///
/// Fields are kept verbatim from the wire: `year` may be a range such as
/// `"2009–2011"`, and `poster` may be the literal `"N/A"`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    pub title: String,
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub movie_type: String,
    #[serde(default)]
    pub poster: String,
    /// Comma-separated genre list. Absent from search results.
    #[serde(default)]
    pub genre: Option<String>,
    /// Only present on detail lookups
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
}

/// Full record returned by a `plot=full` detail lookup.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovieDetail {
    #[serde(flatten)]
    pub movie: OmdbMovie,
    #[serde(default)]
    pub rated: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub writer: Option<String>,
    #[serde(default)]
    pub actors: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub awards: Option<String>,
    #[serde(default)]
    pub metascore: Option<String>,
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: Option<String>,
    #[serde(default)]
    pub box_office: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub movies: Vec<OmdbMovie>,
    /// Total matches upstream, across all pages. 0 when unparsable.
    pub total_results: u32,
}

/// Search response body after the `Response` flag has been checked
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbMovie>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
}

impl From<SearchEnvelope> for SearchPage {
    fn from(envelope: SearchEnvelope) -> Self {
        let total_results = envelope
            .total_results
            .as_deref()
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(0);
        Self {
            movies: envelope.search,
            total_results,
        }
    }
}
