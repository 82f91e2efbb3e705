use std::fmt;
use std::sync::Arc;

use crate::app::filters::{FilterCriteria, rating_text};
use crate::app::models::{Genre, MovieFull, MovieSummary, Paged};

/// A metadata operation together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Trending { page: u32 },
    Search { query: String, page: u32 },
    Genres,
    Discover { page: u32, filters: FilterCriteria },
    MovieFull { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Trending,
    Search,
    Discover,
    Genres,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Movies(Collection),
    Movie(u64),
}

/// Normalized `path?params` of a query, without the language parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Movies(Arc<Paged<MovieSummary>>),
    Genres(Arc<Vec<Genre>>),
    Movie(Arc<MovieFull>),
}

impl QueryData {
    pub fn movies(&self) -> Option<Arc<Paged<MovieSummary>>> {
        match self {
            QueryData::Movies(paged) => Some(Arc::clone(paged)),
            _ => None,
        }
    }

    pub fn genres(&self) -> Option<Arc<Vec<Genre>>> {
        match self {
            QueryData::Genres(genres) => Some(Arc::clone(genres)),
            _ => None,
        }
    }

    pub fn movie(&self) -> Option<Arc<MovieFull>> {
        match self {
            QueryData::Movie(movie) => Some(Arc::clone(movie)),
            _ => None,
        }
    }
}

impl Query {
    pub fn operation(&self) -> &'static str {
        match self {
            Query::Trending { .. } => "trending",
            Query::Search { .. } => "search",
            Query::Genres => "genres",
            Query::Discover { .. } => "discover",
            Query::MovieFull { .. } => "movie",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Query::Trending { .. } => "/trending/movie/week".to_string(),
            Query::Search { .. } => "/search/movie".to_string(),
            Query::Genres => "/genre/movie/list".to_string(),
            Query::Discover { .. } => "/discover/movie".to_string(),
            Query::MovieFull { id } => format!("/movie/{}", id),
        }
    }

    /// Outbound query parameters. Absent discover filters produce no parameter at all.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Query::Trending { page } => vec![("page", page.to_string())],
            Query::Search { query, page } => vec![
                ("query", query.clone()),
                ("page", page.to_string()),
                ("include_adult", "false".to_string()),
            ],
            Query::Genres => Vec::new(),
            Query::Discover { page, filters } => {
                let mut params = vec![
                    ("page", page.to_string()),
                    ("include_adult", "false".to_string()),
                    ("sort_by", "popularity.desc".to_string()),
                ];
                if let Some(genre_id) = filters.genre_id {
                    params.push(("with_genres", genre_id.to_string()));
                }
                if let Some(year) = filters.year {
                    params.push(("primary_release_year", year.to_string()));
                }
                if let Some(min) = filters.rating_min {
                    params.push(("vote_average.gte", rating_text(min)));
                }
                if let Some(max) = filters.rating_max {
                    params.push(("vote_average.lte", rating_text(max)));
                }
                params
            }
            Query::MovieFull { .. } => vec![("append_to_response", "credits".to_string())],
        }
    }

    pub fn is_localized(&self) -> bool {
        matches!(self, Query::Genres | Query::MovieFull { .. })
    }

    /// Path and query string sent to the API, relative to the base URL.
    pub fn endpoint(&self, language: &str) -> String {
        let mut params = self.params();
        if self.is_localized() && !language.is_empty() {
            params.push(("language", language.to_string()));
        }
        join_path(&self.path(), &params)
    }

    pub fn key(&self) -> QueryKey {
        QueryKey(join_path(&self.path(), &self.params()))
    }

    pub fn collection(&self) -> Option<Collection> {
        match self {
            Query::Trending { .. } => Some(Collection::Trending),
            Query::Search { .. } => Some(Collection::Search),
            Query::Genres => Some(Collection::Genres),
            Query::Discover { .. } => Some(Collection::Discover),
            Query::MovieFull { .. } => None,
        }
    }

    /// Tags for a result: its collection plus every movie id it contains.
    pub fn tags(&self, data: &QueryData) -> Vec<CacheTag> {
        let mut tags: Vec<CacheTag> = self
            .collection()
            .map(CacheTag::Movies)
            .into_iter()
            .collect();
        match data {
            QueryData::Movies(paged) => {
                tags.extend(paged.results.iter().map(|m| CacheTag::Movie(m.id)));
            }
            QueryData::Movie(movie) => tags.push(CacheTag::Movie(movie.id)),
            QueryData::Genres(_) => {}
        }
        tags
    }
}

fn join_path(path: &str, params: &[(&'static str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}
