use crate::config::Config;
use crate::omdb::models::{OmdbMovieDetail, SearchEnvelope, SearchPage};
use crate::omdb::{MovieApi, OmdbQuery};
use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

#[derive(Error, Debug)]
pub enum OmdbError {
    #[error("{0}")]
    Request(#[from] ReqwestError),
    #[error("Request failed with status code {}", .0.as_u16())]
    Status(StatusCode),
    /// Logical failure: HTTP 200 with `"Response": "False"`. Displays as the
    /// upstream message verbatim.
    #[error("{0}")]
    Api(String),
    #[error("Malformed response from OMDb: {0}")]
    MalformedResponse(String),
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(config.omdb_api_key.clone(), config.omdb_base_url.clone())
    }

    /// Issue one GET with the credential merged into `query`'s parameters and
    /// return the body once the `Response` flag has been checked.
    async fn fetch(&self, query: &OmdbQuery) -> Result<serde_json::Value, OmdbError> {
        let mut params: Vec<(&str, &str)> = vec![("apikey", self.api_key.as_str())];
        params.extend(query.params());
        info!("📡 OMDb API: GET {} {:?}", self.base_url, query);
        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;
        let status = response.status();
        debug!("Response status: {}", status);
        if !status.is_success() {
            warn!("✗ OMDb API error: {}", status);
            return Err(OmdbError::Status(status));
        }
        let body: serde_json::Value = response.json().await?;
        check_response_flag(body)
    }
}

/// OMDb reports logical errors with a 200 and `"Response": "False"`.
fn check_response_flag(body: serde_json::Value) -> Result<serde_json::Value, OmdbError> {
    match body.get("Response").and_then(|r| r.as_str()) {
        Some("False") => {
            let message = body
                .get("Error")
                .and_then(|e| e.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            warn!("✗ OMDb returned error: {}", message);
            Err(OmdbError::Api(message))
        }
        Some(_) => Ok(body),
        None => Err(OmdbError::MalformedResponse(
            "missing Response field".to_string(),
        )),
    }
}

fn decode<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, OmdbError> {
    serde_json::from_value(body).map_err(|e| OmdbError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl MovieApi for OmdbClient {
    async fn search(&self, term: &str) -> Result<SearchPage, OmdbError> {
        let body = self
            .fetch(&OmdbQuery::Search {
                term: term.to_string(),
            })
            .await?;
        let page = SearchPage::from(decode::<SearchEnvelope>(body)?);
        info!(
            "✓ OMDb search returned {} result(s) of {}",
            page.movies.len(),
            page.total_results
        );
        Ok(page)
    }

    async fn movie_details(&self, imdb_id: &str) -> Result<OmdbMovieDetail, OmdbError> {
        let body = self
            .fetch(&OmdbQuery::Detail {
                imdb_id: imdb_id.to_string(),
            })
            .await?;
        let detail: OmdbMovieDetail = decode(body)?;
        info!("✓ OMDb details for {}: {}", imdb_id, detail.movie.title);
        Ok(detail)
    }
}
