use std::sync::Arc;

use crate::app::error::ApiError;
use crate::app::models::{CastMember, CrewMember, MovieFull};
use crate::app::utils::{format_runtime, release_year};

/// Cast members shown on the detail screen.
pub const TOP_CAST: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    InvalidId,
    Loading,
    Failed(ApiError),
    Ready(Arc<MovieFull>),
}

impl MovieFull {
    pub fn director(&self) -> Option<&CrewMember> {
        self.credits
            .crew
            .iter()
            .find(|member| member.job.as_deref() == Some("Director"))
    }

    pub fn top_cast(&self) -> &[CastMember] {
        let end = self.credits.cast.len().min(TOP_CAST);
        &self.credits.cast[..end]
    }

    pub fn year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    pub fn runtime_label(&self) -> Option<String> {
        self.runtime.filter(|m| *m > 0).map(format_runtime)
    }

    pub fn genre_names(&self) -> Option<String> {
        if self.genres.is_empty() {
            return None;
        }
        Some(
            self.genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(" • "),
        )
    }

    pub fn overview_or_placeholder(&self) -> &str {
        self.overview
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .unwrap_or("No synopsis available.")
    }

    pub fn countries(&self) -> Option<String> {
        if self.production_countries.is_empty() {
            return None;
        }
        Some(
            self.production_countries
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    pub fn languages(&self) -> Option<String> {
        if self.spoken_languages.is_empty() {
            return None;
        }
        Some(
            self.spoken_languages
                .iter()
                .map(|l| l.label())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
