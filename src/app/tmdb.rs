use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::app::error::ApiError;
use crate::app::filters::FilterCriteria;
use crate::app::models::{Genre, GenreList, MovieFull, MovieSummary, Paged};
use crate::app::query::{Query, QueryData};
use crate::config::Config;

/// Typed access to the movie metadata provider. Calls block, so run them off the UI thread.
pub trait MovieApi: Send + Sync {
    fn trending(&self, page: u32) -> Result<Paged<MovieSummary>, ApiError>;
    fn search_movies(&self, query: &str, page: u32) -> Result<Paged<MovieSummary>, ApiError>;
    fn genres(&self) -> Result<Vec<Genre>, ApiError>;
    fn discover_movies(
        &self,
        page: u32,
        filters: &FilterCriteria,
    ) -> Result<Paged<MovieSummary>, ApiError>;
    fn movie_full(&self, id: u64) -> Result<MovieFull, ApiError>;
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError>;

    /// Runs whichever operation `query` describes.
    fn execute(&self, query: &Query) -> Result<QueryData, ApiError> {
        match query {
            Query::Trending { page } => Ok(QueryData::Movies(Arc::new(self.trending(*page)?))),
            Query::Search { query, page } => {
                Ok(QueryData::Movies(Arc::new(self.search_movies(query, *page)?)))
            }
            Query::Genres => Ok(QueryData::Genres(Arc::new(self.genres()?))),
            Query::Discover { page, filters } => Ok(QueryData::Movies(Arc::new(
                self.discover_movies(*page, filters)?,
            ))),
            Query::MovieFull { id } => Ok(QueryData::Movie(Arc::new(self.movie_full(*id)?))),
        }
    }
}

/// Blocking TMDB v3 client authenticated with a bearer token
pub struct TmdbClient {
    client: Client,
    base_url: String,
    token: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &Config, token: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(concat!("cine_discover/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::from_client(client, config, token))
    }

    fn from_client(client: Client, config: &Config, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            token: token.into(),
            language: config.language.clone(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, query: &Query) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, query.endpoint(&self.language));
        debug!(operation = query.operation(), %url, "requesting");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text()?;
        let parsed = serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("{} response: {}", query.operation(), e)))?;
        info!(operation = query.operation(), "request complete");
        Ok(parsed)
    }
}

impl MovieApi for TmdbClient {
    fn trending(&self, page: u32) -> Result<Paged<MovieSummary>, ApiError> {
        self.get_json(&Query::Trending { page })
    }

    fn search_movies(&self, query: &str, page: u32) -> Result<Paged<MovieSummary>, ApiError> {
        self.get_json(&Query::Search {
            query: query.to_string(),
            page,
        })
    }

    fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        let list: GenreList = self.get_json(&Query::Genres)?;
        Ok(list.genres)
    }

    fn discover_movies(
        &self,
        page: u32,
        filters: &FilterCriteria,
    ) -> Result<Paged<MovieSummary>, ApiError> {
        self.get_json(&Query::Discover {
            page,
            filters: *filters,
        })
    }

    fn movie_full(&self, id: u64) -> Result<MovieFull, ApiError> {
        self.get_json(&Query::MovieFull { id })
    }

    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                message: format!("failed to download {}", url),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}
