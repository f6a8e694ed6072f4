//! OMDb (Open Movie Database) API client
//!
//! Both lookups go through a single endpoint; the parameter set decides
//! whether the body is a search page or a single detail record.

mod client;
mod models;

pub use client::{OmdbClient, OmdbError, DEFAULT_BASE_URL};
pub use models::{OmdbMovie, OmdbMovieDetail, SearchPage};

use async_trait::async_trait;

/// Parameter set for one OMDb request, excluding the credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmdbQuery {
    /// `s=<term>`: list mode
    Search { term: String },
    /// `i=<id>&plot=full`: detail mode
    Detail { imdb_id: String },
}

impl OmdbQuery {
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        match self {
            OmdbQuery::Search { term } => vec![("s", term.as_str())],
            OmdbQuery::Detail { imdb_id } => vec![("i", imdb_id.as_str()), ("plot", "full")],
        }
    }
}

/// Movie metadata source. Implemented by [`OmdbClient`] and by test mocks.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Search by free text. Returns the first page only.
    async fn search(&self, term: &str) -> Result<SearchPage, OmdbError>;

    /// Full record for one IMDb id, with the long plot.
    async fn movie_details(&self, imdb_id: &str) -> Result<OmdbMovieDetail, OmdbError>;
}
