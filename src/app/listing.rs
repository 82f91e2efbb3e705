use std::sync::Arc;

use crate::app::error::ApiError;
use crate::app::filters::FilterCriteria;
use crate::app::models::{MovieSummary, Paged};
use crate::app::query::Query;

/// Cards rendered per page; the API returns 20 but the grid shows 6x3.
pub const VISIBLE_CARDS: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Trending,
    Search,
    Discover,
}

impl Mode {
    pub fn title(self) -> &'static str {
        match self {
            Mode::Trending => "Trending movies",
            Mode::Search => "Search results",
            Mode::Discover => "Filtered movies",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Mode::Trending => "There was a problem loading trending movies.",
            Mode::Search => "Could not load the search results.",
            Mode::Discover => "Could not load the filtered results.",
        }
    }
}

/// Filters win over search, search over trending. Never stored, always derived.
pub fn resolve_mode(filters: &FilterCriteria, search: &str) -> Mode {
    if filters.is_active() {
        Mode::Discover
    } else if !search.trim().is_empty() {
        Mode::Search
    } else {
        Mode::Trending
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingAction {
    PushDraft(char),
    PopDraft,
    SetDraft(String),
    SubmitSearch,
    ClearSearch,
    PreviousPage,
    NextPage,
}

/// Page, query draft and committed search of the listing screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    pub page: u32,
    pub draft: String,
    pub search: String,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            page: 1,
            draft: String::new(),
            search: String::new(),
        }
    }
}

impl ListingState {
    pub fn mode(&self, filters: &FilterCriteria) -> Mode {
        resolve_mode(filters, &self.search)
    }

    /// The one query the current mode needs; the other two are never issued.
    pub fn active_query(&self, filters: &FilterCriteria) -> Query {
        match self.mode(filters) {
            Mode::Trending => Query::Trending { page: self.page },
            Mode::Search => Query::Search {
                query: self.search.trim().to_string(),
                page: self.page,
            },
            Mode::Discover => Query::Discover {
                page: self.page,
                filters: *filters,
            },
        }
    }

    pub fn reduce(&mut self, action: ListingAction, paginator: &Paginator) {
        match action {
            ListingAction::PushDraft(c) => self.draft.push(c),
            ListingAction::PopDraft => {
                self.draft.pop();
            }
            ListingAction::SetDraft(draft) => self.draft = draft,
            ListingAction::SubmitSearch => {
                self.page = 1;
                self.search = self.draft.trim().to_string();
            }
            ListingAction::ClearSearch => {
                self.draft.clear();
                self.search.clear();
                self.page = 1;
            }
            ListingAction::PreviousPage => {
                if paginator.can_prev() {
                    self.page = self.page.saturating_sub(1).max(1);
                }
            }
            ListingAction::NextPage => {
                if paginator.can_next() {
                    self.page = (self.page + 1).min(paginator.total_pages());
                }
            }
        }
    }
}

/// Page indicator and prev/next availability for the active result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub page: u32,
    pub total_pages: u32,
    pub fetching: bool,
}

impl Paginator {
    pub fn total_pages(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1 && !self.fetching
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages() && !self.fetching
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingStatus {
    Loading,
    Failed(ApiError),
    Ready(Arc<Paged<MovieSummary>>),
}

/// Everything the listing screen needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub mode: Mode,
    pub status: ListingStatus,
    pub fetching: bool,
    pub search: String,
}

impl ListingView {
    pub fn paginator(&self) -> Paginator {
        let (page, total_pages) = match &self.status {
            ListingStatus::Ready(paged) => (paged.page.max(1), paged.total_pages),
            _ => (1, 1),
        };
        Paginator {
            page,
            total_pages,
            fetching: self.fetching,
        }
    }

    pub fn visible(&self) -> &[MovieSummary] {
        match &self.status {
            ListingStatus::Ready(paged) => {
                let end = paged.results.len().min(VISIBLE_CARDS);
                &paged.results[..end]
            }
            _ => &[],
        }
    }

    pub fn empty_message(&self) -> Option<String> {
        let ListingStatus::Ready(paged) = &self.status else {
            return None;
        };
        if paged.total_results != 0 {
            return None;
        }
        Some(match self.mode {
            Mode::Discover => "No movies match these filters.".to_string(),
            _ => format!("No movies found for “{}”.", self.search),
        })
    }
}
