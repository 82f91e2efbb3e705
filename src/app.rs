mod cache;
pub mod detail;
pub mod error;
pub mod filters;
pub mod input;
pub mod listing;
pub mod models;
pub mod query;
pub mod route;
pub mod tmdb;
pub mod utils;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, mpsc};
use std::thread;

use chrono::Datelike;
use image::DynamicImage;
use ratatui_image::{picker::Picker, protocol::StatefulProtocol};
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};

use crate::config::Config;
use cache::QueryCache;
use detail::DetailStatus;
use error::ApiError;
use filters::{FilterAction, FilterCriteria, FilterStore, rating_text};
use input::{FilterField, parse_rating, parse_year};
use listing::{ListingAction, ListingState, ListingStatus, ListingView, Mode, VISIBLE_CARDS};
use models::{Genre, MovieSummary, Paged};
use query::{CacheTag, Query, QueryData, QueryKey};
use route::{Route, parse_movie_id};
use tmdb::MovieApi;
use utils::{POSTER_SIZE, image_url};

/// Cards per row in the listing grid.
pub const GRID_COLUMNS: usize = 6;

pub enum FetchMessage {
    Query {
        query: Query,
        result: Result<QueryData, ApiError>,
    },
    Poster {
        path: String,
        result: Result<DynamicImage, String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Filter(FilterField),
}

/// Every state change the UI can request
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Listing(ListingAction),
    Filter(FilterAction),
    Retry,
    Open(Route),
    Back,
}

pub struct App {
    pub route: Route,
    history: Vec<Route>,
    api: Option<Arc<dyn MovieApi>>,
    image_base: String,
    cache: QueryCache,
    pub filters: FilterStore,
    pub listing: ListingState,
    pub input_mode: InputMode,
    pub filter_input: String,
    pub notice: Option<String>,
    in_flight: HashSet<QueryKey>,
    failures: HashMap<QueryKey, ApiError>,
    // Last result per mode, shown while the next page or term is in flight.
    shown: HashMap<Mode, Arc<Paged<MovieSummary>>>,
    listing_key: Option<QueryKey>,
    sender: mpsc::Sender<FetchMessage>,
    receiver: mpsc::Receiver<FetchMessage>,
    pub selected_movie_index: usize,
    pub throbber_state: ThrobberState,
    picker: Option<Picker>,
    poster: Option<(String, StatefulProtocol)>,
    poster_pending: Option<String>,
    poster_failed: HashSet<String>,
}

impl App {
    pub fn new(config: &Config, api: Option<Arc<dyn MovieApi>>, route: Route) -> Self {
        let (sender, receiver) = mpsc::channel();

        Self {
            route,
            history: Vec::new(),
            api,
            image_base: config.image_base.clone(),
            cache: QueryCache::new(config.cache_ttl),
            filters: FilterStore::new(),
            listing: ListingState::default(),
            input_mode: InputMode::Normal,
            filter_input: String::new(),
            notice: None,
            in_flight: HashSet::new(),
            failures: HashMap::new(),
            shown: HashMap::new(),
            listing_key: None,
            sender,
            receiver,
            selected_movie_index: 0,
            throbber_state: ThrobberState::default(),
            picker: None,
            poster: None,
            poster_pending: None,
            poster_failed: HashSet::new(),
        }
    }

    pub fn with_picker(mut self, picker: Picker) -> Self {
        self.picker = Some(picker);
        self
    }

    pub fn has_api(&self) -> bool {
        self.api.is_some()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.filters.state()
    }

    pub fn mode(&self) -> Mode {
        self.listing.mode(&self.filters.state())
    }

    pub fn active_query(&self) -> Query {
        self.listing.active_query(&self.filters.state())
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Listing(action) => {
                let paginator = self.listing_view().paginator();
                self.listing.reduce(action, &paginator);
            }
            Action::Filter(action) => {
                let changed = self.filters.dispatch(action);
                if action == FilterAction::Reset || (changed && self.filters.state().is_active()) {
                    self.listing.page = 1;
                }
            }
            Action::Retry => self.retry(),
            Action::Open(route) => {
                debug!(from = %self.route.path(), to = %route.path(), "navigate");
                let previous = std::mem::replace(&mut self.route, route);
                self.history.push(previous);
            }
            Action::Back => {
                self.route = self.history.pop().unwrap_or(Route::Listing);
            }
        }
    }

    /// Issues whatever the current screen needs and is not cached, in flight or failed.
    pub fn sync(&mut self) {
        if self.api.is_none() {
            return;
        }

        match self.route.clone() {
            Route::Listing => {
                self.ensure(Query::Genres);

                let query = self.active_query();
                let key = query.key();
                if self.listing_key.as_ref() != Some(&key) {
                    self.selected_movie_index = 0;
                    self.listing_key = Some(key.clone());
                }
                self.ensure(query);

                if let Some(paged) = self.cache.get(&key).and_then(|d| d.movies()) {
                    self.shown.insert(self.mode(), paged);
                }
            }
            Route::Detail(raw) => {
                if let Some(id) = parse_movie_id(&raw) {
                    self.ensure(Query::MovieFull { id });
                    self.ensure_poster(id);
                }
            }
        }
    }

    /// Applies every fetch result that has arrived since the last frame.
    pub fn pump(&mut self) {
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_message(message);
        }
    }

    pub fn listing_view(&self) -> ListingView {
        let mode = self.mode();
        let key = self.active_query().key();
        let fetching = self.in_flight.contains(&key);

        let status = if let Some(err) = self.failures.get(&key) {
            ListingStatus::Failed(err.clone())
        } else if let Some(paged) = self.cache.get(&key).and_then(|d| d.movies()) {
            ListingStatus::Ready(paged)
        } else if let Some(paged) = self.shown.get(&mode).filter(|_| fetching) {
            ListingStatus::Ready(Arc::clone(paged))
        } else {
            ListingStatus::Loading
        };

        ListingView {
            mode,
            status,
            fetching,
            search: self.listing.search.clone(),
        }
    }

    pub fn detail_status(&self) -> Option<DetailStatus> {
        let Route::Detail(raw) = &self.route else {
            return None;
        };
        let Some(id) = parse_movie_id(raw) else {
            return Some(DetailStatus::InvalidId);
        };

        let key = Query::MovieFull { id }.key();
        Some(if let Some(err) = self.failures.get(&key) {
            DetailStatus::Failed(err.clone())
        } else if let Some(movie) = self.cache.get(&key).and_then(|d| d.movie()) {
            DetailStatus::Ready(movie)
        } else {
            DetailStatus::Loading
        })
    }

    pub fn genres(&self) -> Arc<Vec<Genre>> {
        self.cache
            .get(&Query::Genres.key())
            .and_then(|d| d.genres())
            .unwrap_or_default()
    }

    pub fn genre_name(&self, id: u32) -> String {
        self.genres()
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    /// Steps the genre filter through "All" followed by every known genre.
    pub fn cycle_genre(&mut self, forward: bool) {
        let genres = self.genres();
        if genres.is_empty() {
            return;
        }
        let current = self
            .filters
            .state()
            .genre_id
            .and_then(|id| genres.iter().position(|g| g.id == id));

        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(genres.len() - 1),
            (Some(i), true) if i + 1 < genres.len() => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };
        let genre_id = next.map(|i| genres[i].id);
        self.dispatch(Action::Filter(FilterAction::SetGenreId(genre_id)));
    }

    pub fn begin_filter_input(&mut self, field: FilterField) {
        let criteria = self.filters.state();
        self.filter_input = match field {
            FilterField::Year => criteria.year.map(|y| y.to_string()),
            FilterField::RatingMin => criteria.rating_min.map(rating_text),
            FilterField::RatingMax => criteria.rating_max.map(rating_text),
        }
        .unwrap_or_default();
        self.notice = None;
        self.input_mode = InputMode::Filter(field);
    }

    pub fn commit_filter_input(&mut self) {
        let InputMode::Filter(field) = self.input_mode else {
            return;
        };
        self.input_mode = InputMode::Normal;

        let raw = std::mem::take(&mut self.filter_input);
        let action = match field {
            FilterField::Year => {
                parse_year(&raw, chrono::Local::now().year()).map(FilterAction::SetYear)
            }
            FilterField::RatingMin => parse_rating(&raw).map(FilterAction::SetRatingMin),
            FilterField::RatingMax => parse_rating(&raw).map(FilterAction::SetRatingMax),
        };

        match action {
            Ok(action) => {
                self.notice = None;
                self.dispatch(Action::Filter(action));
            }
            Err(err) => {
                debug!(field = field.label(), %err, "rejected filter input");
                self.notice = Some(format!("{}: {}", field.label(), err));
            }
        }
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.filter_input.clear();
    }

    pub fn visible_count(&self) -> usize {
        self.listing_view().visible().len()
    }

    pub fn next_movie(&mut self) {
        self.move_selection(1);
    }

    pub fn previous_movie(&mut self) {
        self.move_selection(-1);
    }

    pub fn next_row(&mut self) {
        self.move_selection(GRID_COLUMNS as isize);
    }

    pub fn previous_row(&mut self) {
        self.move_selection(-(GRID_COLUMNS as isize));
    }

    fn move_selection(&mut self, delta: isize) {
        let movie_count = self.visible_count().min(VISIBLE_CARDS);
        if movie_count == 0 {
            return;
        }
        let target = self.selected_movie_index as isize + delta;
        self.selected_movie_index = target.clamp(0, movie_count as isize - 1) as usize;
    }

    pub fn open_selected(&mut self) {
        let view = self.listing_view();
        if let Some(movie) = view.visible().get(self.selected_movie_index) {
            self.dispatch(Action::Open(Route::movie(movie.id)));
        }
    }

    pub fn poster_for(&mut self, path: &str) -> Option<&mut StatefulProtocol> {
        match &mut self.poster {
            Some((loaded, protocol)) if loaded == path => Some(protocol),
            _ => None,
        }
    }

    pub fn poster_loading(&self, path: &str) -> bool {
        self.poster_pending.as_deref() == Some(path)
    }

    pub fn poster_url(&self, path: Option<&str>) -> String {
        image_url(&self.image_base, POSTER_SIZE, path)
    }

    fn retry(&mut self) {
        match self.route.clone() {
            Route::Listing => {
                self.failures.remove(&Query::Genres.key());
                let query = self.active_query();
                self.refetch(query);
            }
            Route::Detail(raw) => {
                let Some(id) = parse_movie_id(&raw) else {
                    return;
                };
                let key = Query::MovieFull { id }.key();
                if let Some(path) = self
                    .cache
                    .get(&key)
                    .and_then(|d| d.movie())
                    .and_then(|m| m.poster_path.clone())
                {
                    self.poster_failed.remove(&path);
                }
                let dropped = self.cache.invalidate_tag(CacheTag::Movie(id));
                info!(id, dropped, "refreshing movie");
                self.refetch(Query::MovieFull { id });
            }
        }
    }

    fn refetch(&mut self, query: Query) {
        let key = query.key();
        self.failures.remove(&key);
        self.cache.invalidate(&key);
        if !self.in_flight.contains(&key) {
            self.spawn_fetch(query);
        }
    }

    fn ensure(&mut self, query: Query) {
        let key = query.key();
        if self.in_flight.contains(&key)
            || self.failures.contains_key(&key)
            || self.cache.contains(&key)
        {
            return;
        }
        self.spawn_fetch(query);
    }

    fn spawn_fetch(&mut self, query: Query) {
        let Some(api) = self.api.clone() else {
            return;
        };
        let key = query.key();
        info!(operation = query.operation(), %key, "fetching");
        self.in_flight.insert(key);

        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = api.execute(&query);
            let _ = sender.send(FetchMessage::Query { query, result });
        });
    }

    fn ensure_poster(&mut self, id: u64) {
        if self.picker.is_none() {
            return;
        }
        let Some(api) = self.api.clone() else {
            return;
        };
        let Some(movie) = self
            .cache
            .get(&Query::MovieFull { id }.key())
            .and_then(|d| d.movie())
        else {
            return;
        };
        let Some(path) = movie.poster_path.clone() else {
            return;
        };
        let loaded = matches!(&self.poster, Some((loaded, _)) if *loaded == path);
        if loaded || self.poster_loading(&path) || self.poster_failed.contains(&path) {
            return;
        }

        let url = self.poster_url(Some(&path));
        self.poster_pending = Some(path.clone());
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = api
                .fetch_image(&url)
                .map_err(|e| e.to_string())
                .and_then(|bytes| image::load_from_memory(&bytes).map_err(|e| e.to_string()));
            let _ = sender.send(FetchMessage::Poster { path, result });
        });
    }

    fn handle_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::Query { query, result } => {
                let key = query.key();
                self.in_flight.remove(&key);
                match result {
                    Ok(data) => {
                        let tags = query.tags(&data);
                        self.failures.remove(&key);
                        self.cache.insert(key, data, tags);
                    }
                    Err(err) => {
                        warn!(%key, error = %err, "request failed");
                        self.failures.insert(key, err);
                    }
                }
            }
            FetchMessage::Poster { path, result } => {
                if self.poster_pending.as_deref() == Some(path.as_str()) {
                    self.poster_pending = None;
                }
                match (result, &mut self.picker) {
                    (Ok(img), Some(picker)) => {
                        let protocol = picker.new_resize_protocol(img);
                        self.poster = Some((path, protocol));
                    }
                    (Ok(_), None) => {}
                    (Err(err), _) => {
                        warn!(%path, error = %err, "poster download failed");
                        self.poster_failed.insert(path);
                    }
                }
            }
        }
    }

    #[cfg(test)]
    fn settle(&mut self) {
        use std::time::Duration;
        while !self.in_flight.is_empty() {
            match self.receiver.recv_timeout(Duration::from_secs(5)) {
                Ok(message) => self.handle_message(message),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::MovieFull;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<Query>>,
        fail_with: Mutex<Option<ApiError>>,
        total_pages: u32,
        empty: bool,
    }

    impl FakeApi {
        fn paged(total_pages: u32) -> Self {
            Self {
                total_pages,
                ..Default::default()
            }
        }

        fn record(&self, query: Query) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(query);
            match self.fail_with.lock().unwrap().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn page(&self, page: u32) -> Paged<MovieSummary> {
            if self.empty {
                return Paged {
                    page,
                    results: Vec::new(),
                    total_pages: 0,
                    total_results: 0,
                };
            }
            Paged {
                page,
                results: (0..20)
                    .map(|i| MovieSummary {
                        id: u64::from(page) * 100 + i,
                        title: format!("Movie {}-{}", page, i),
                        poster_path: None,
                        vote_average: 7.3,
                        release_date: Some("2020-01-01".into()),
                    })
                    .collect(),
                total_pages: self.total_pages,
                total_results: u64::from(self.total_pages) * 20,
            }
        }

        fn listing_calls(&self) -> Vec<Query> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|q| !matches!(q, Query::Genres))
                .cloned()
                .collect()
        }

        fn fail(&self, err: Option<ApiError>) {
            *self.fail_with.lock().unwrap() = err;
        }
    }

    impl MovieApi for FakeApi {
        fn trending(&self, page: u32) -> Result<Paged<MovieSummary>, ApiError> {
            self.record(Query::Trending { page })?;
            Ok(self.page(page))
        }

        fn search_movies(&self, query: &str, page: u32) -> Result<Paged<MovieSummary>, ApiError> {
            self.record(Query::Search { query: query.to_string(), page })?;
            Ok(self.page(page))
        }

        fn genres(&self) -> Result<Vec<Genre>, ApiError> {
            self.calls.lock().unwrap().push(Query::Genres);
            Ok(vec![
                Genre { id: 28, name: "Action".into() },
                Genre { id: 35, name: "Comedy".into() },
                Genre { id: 18, name: "Drama".into() },
            ])
        }

        fn discover_movies(
            &self,
            page: u32,
            filters: &FilterCriteria,
        ) -> Result<Paged<MovieSummary>, ApiError> {
            self.record(Query::Discover { page, filters: *filters })?;
            Ok(self.page(page))
        }

        fn movie_full(&self, id: u64) -> Result<MovieFull, ApiError> {
            self.record(Query::MovieFull { id })?;
            Ok(MovieFull {
                id,
                title: "The Matrix".into(),
                overview: None,
                poster_path: Some("/poster.jpg".into()),
                backdrop_path: None,
                vote_average: 8.2,
                release_date: Some("1999-03-31".into()),
                runtime: Some(136),
                genres: Vec::new(),
                production_countries: Vec::new(),
                spoken_languages: Vec::new(),
                credits: Default::default(),
            })
        }

        fn fetch_image(&self, _url: &str) -> Result<Vec<u8>, ApiError> {
            Err(ApiError::Transport("no images in tests".into()))
        }
    }

    fn config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    fn app_with(api: Arc<FakeApi>) -> App {
        App::new(&config(), Some(api as Arc<dyn MovieApi>), Route::Listing)
    }

    fn tick(app: &mut App) {
        app.sync();
        app.settle();
        app.sync();
    }

    fn submit(app: &mut App, term: &str) {
        for c in term.chars() {
            app.dispatch(Action::Listing(ListingAction::PushDraft(c)));
        }
        app.dispatch(Action::Listing(ListingAction::SubmitSearch));
    }

    #[test]
    fn startup_issues_trending_page_one_only() {
        let api = Arc::new(FakeApi::paged(3));
        let mut app = app_with(Arc::clone(&api));
        tick(&mut app);

        assert_eq!(api.listing_calls(), vec![Query::Trending { page: 1 }]);
        assert!(api.calls.lock().unwrap().contains(&Query::Genres));
        let view = app.listing_view();
        assert_eq!(view.mode, Mode::Trending);
        assert!(matches!(view.status, ListingStatus::Ready(_)));
        assert_eq!(view.visible().len(), 18);
    }

    #[test]
    fn enter_commits_search_and_skips_other_modes() {
        let api = Arc::new(FakeApi::paged(5));
        let mut app = app_with(Arc::clone(&api));
        tick(&mut app);
        app.dispatch(Action::Listing(ListingAction::NextPage));
        tick(&mut app);
        assert_eq!(app.listing.page, 2);

        submit(&mut app, "Matrix");
        assert_eq!(app.listing.page, 1);
        tick(&mut app);

        assert_eq!(
            api.listing_calls(),
            vec![
                Query::Trending { page: 1 },
                Query::Trending { page: 2 },
                Query::Search { query: "Matrix".into(), page: 1 },
            ]
        );
        assert_eq!(app.mode(), Mode::Search);
    }

    #[test]
    fn genre_overrides_active_search() {
        let api = Arc::new(FakeApi::paged(5));
        let mut app = app_with(Arc::clone(&api));
        submit(&mut app, "Matrix");
        app.dispatch(Action::Filter(FilterAction::SetGenreId(Some(28))));
        tick(&mut app);

        let filters = FilterCriteria { genre_id: Some(28), ..Default::default() };
        assert_eq!(api.listing_calls(), vec![Query::Discover { page: 1, filters }]);
        assert_eq!(app.mode(), Mode::Discover);
    }

    #[test]
    fn filter_change_resets_page() {
        let api = Arc::new(FakeApi::paged(9));
        let mut app = app_with(Arc::clone(&api));
        app.dispatch(Action::Filter(FilterAction::SetYear(Some(1999))));
        tick(&mut app);
        app.dispatch(Action::Listing(ListingAction::NextPage));
        tick(&mut app);
        app.dispatch(Action::Listing(ListingAction::NextPage));
        assert_eq!(app.listing.page, 3);

        app.dispatch(Action::Filter(FilterAction::SetRatingMin(Some(7.0))));
        assert_eq!(app.listing.page, 1);
    }

    #[test]
    fn reset_filters_returns_to_first_page() {
        let api = Arc::new(FakeApi::paged(9));
        let mut app = app_with(Arc::clone(&api));
        app.dispatch(Action::Filter(FilterAction::SetGenreId(Some(18))));
        tick(&mut app);
        app.dispatch(Action::Listing(ListingAction::NextPage));
        assert_eq!(app.listing.page, 2);

        app.dispatch(Action::Filter(FilterAction::Reset));
        assert_eq!(app.listing.page, 1);
        assert_eq!(app.criteria(), FilterCriteria::default());
        assert_eq!(app.mode(), Mode::Trending);
    }

    #[test]
    fn paging_is_locked_until_response_arrives() {
        let api = Arc::new(FakeApi::paged(4));
        let mut app = app_with(Arc::clone(&api));
        app.sync();
        // Nothing loaded yet: the paginator knows a single page only.
        app.dispatch(Action::Listing(ListingAction::NextPage));
        assert_eq!(app.listing.page, 1);

        app.settle();
        app.dispatch(Action::Listing(ListingAction::NextPage));
        assert_eq!(app.listing.page, 2);
    }

    #[test]
    fn next_stops_at_last_page() {
        let api = Arc::new(FakeApi::paged(2));
        let mut app = app_with(Arc::clone(&api));
        tick(&mut app);
        app.dispatch(Action::Listing(ListingAction::NextPage));
        tick(&mut app);
        app.dispatch(Action::Listing(ListingAction::NextPage));
        assert_eq!(app.listing.page, 2);
        assert!(!app.listing_view().paginator().can_next());
    }

    #[test]
    fn stale_page_is_shown_while_next_page_loads() {
        let api = Arc::new(FakeApi::paged(4));
        let mut app = app_with(Arc::clone(&api));
        tick(&mut app);
        app.dispatch(Action::Listing(ListingAction::NextPage));
        app.sync();

        let view = app.listing_view();
        assert!(view.fetching);
        match view.status {
            ListingStatus::Ready(paged) => assert_eq!(paged.page, 1),
            other => panic!("expected previous page, got {:?}", other),
        }

        app.settle();
        match app.listing_view().status {
            ListingStatus::Ready(paged) => assert_eq!(paged.page, 2),
            other => panic!("expected page two, got {:?}", other),
        }
    }

    #[test]
    fn responses_are_keyed_by_parameters() {
        let api = Arc::new(FakeApi::paged(4));
        let mut app = app_with(Arc::clone(&api));
        app.sync();
        // Page one is abandoned before its response is applied.
        app.dispatch(Action::Filter(FilterAction::SetGenreId(Some(35))));
        app.sync();
        app.settle();

        let view = app.listing_view();
        assert_eq!(view.mode, Mode::Discover);
        let ListingStatus::Ready(paged) = view.status else {
            panic!("discover result missing");
        };
        let filters = FilterCriteria { genre_id: Some(35), ..Default::default() };
        assert_eq!(
            app.cache.get(&Query::Discover { page: 1, filters }.key()).and_then(|d| d.movies()),
            Some(paged)
        );
    }

    #[test]
    fn failure_is_reported_and_retry_reissues() {
        let api = Arc::new(FakeApi::paged(2));
        api.fail(Some(ApiError::Status { status: 500, message: "boom".into() }));
        let mut app = app_with(Arc::clone(&api));
        tick(&mut app);

        assert!(matches!(
            app.listing_view().status,
            ListingStatus::Failed(ApiError::Status { status: 500, .. })
        ));
        // No automatic retry.
        tick(&mut app);
        assert_eq!(api.listing_calls().len(), 1);

        api.fail(None);
        app.dispatch(Action::Retry);
        app.settle();
        assert!(matches!(app.listing_view().status, ListingStatus::Ready(_)));
        assert_eq!(api.listing_calls().len(), 2);
    }

    #[test]
    fn empty_search_renders_term_message() {
        let api = Arc::new(FakeApi { empty: true, ..FakeApi::paged(1) });
        let mut app = app_with(Arc::clone(&api));
        submit(&mut app, "  Zzyzx ");
        tick(&mut app);
        assert_eq!(
            app.listing_view().empty_message().as_deref(),
            Some("No movies found for “Zzyzx”.")
        );

        app.dispatch(Action::Filter(FilterAction::SetYear(Some(1901))));
        tick(&mut app);
        assert_eq!(
            app.listing_view().empty_message().as_deref(),
            Some("No movies match these filters.")
        );
    }

    #[test]
    fn invalid_detail_id_issues_no_request() {
        let api = Arc::new(FakeApi::paged(1));
        let mut app = App::new(
            &config(),
            Some(Arc::clone(&api) as Arc<dyn MovieApi>),
            Route::Detail("abc".into()),
        );
        tick(&mut app);

        assert_eq!(app.detail_status(), Some(DetailStatus::InvalidId));
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn opening_a_card_loads_its_detail() {
        let api = Arc::new(FakeApi::paged(1));
        let mut app = app_with(Arc::clone(&api));
        tick(&mut app);
        app.next_movie();
        app.open_selected();
        assert_eq!(app.route, Route::Detail("101".into()));
        assert_eq!(app.detail_status(), Some(DetailStatus::Loading));

        tick(&mut app);
        let Some(DetailStatus::Ready(movie)) = app.detail_status() else {
            panic!("detail not loaded");
        };
        assert_eq!(movie.id, 101);

        app.dispatch(Action::Back);
        assert_eq!(app.route, Route::Listing);
    }

    #[test]
    fn detail_refresh_invalidates_listings_with_that_movie() {
        let api = Arc::new(FakeApi::paged(1));
        let mut app = app_with(Arc::clone(&api));
        tick(&mut app);
        let trending = Query::Trending { page: 1 }.key();
        assert!(app.cache.contains(&trending));

        app.dispatch(Action::Open(Route::movie(100)));
        tick(&mut app);
        app.dispatch(Action::Retry);
        assert!(!app.cache.contains(&trending));
        app.settle();

        let detail_calls = api
            .listing_calls()
            .into_iter()
            .filter(|q| matches!(q, Query::MovieFull { id: 100 }))
            .count();
        assert_eq!(detail_calls, 2);
    }

    #[test]
    fn detail_refresh_allows_failed_poster_again() {
        let api = Arc::new(FakeApi::paged(1));
        let mut app = app_with(Arc::clone(&api));
        app.dispatch(Action::Open(Route::movie(603)));
        tick(&mut app);

        app.handle_message(FetchMessage::Poster {
            path: "/poster.jpg".into(),
            result: Err("connection reset".into()),
        });
        assert!(app.poster_failed.contains("/poster.jpg"));

        app.dispatch(Action::Retry);
        assert!(!app.poster_failed.contains("/poster.jpg"));
    }

    #[test]
    fn genre_cycle_wraps_through_all() {
        let api = Arc::new(FakeApi::paged(1));
        let mut app = app_with(Arc::clone(&api));
        tick(&mut app);

        app.cycle_genre(true);
        assert_eq!(app.criteria().genre_id, Some(28));
        app.cycle_genre(true);
        app.cycle_genre(true);
        assert_eq!(app.criteria().genre_id, Some(18));
        app.cycle_genre(true);
        assert_eq!(app.criteria().genre_id, None);
        app.cycle_genre(false);
        assert_eq!(app.criteria().genre_id, Some(18));
        assert_eq!(app.genre_name(18), "Drama");
    }

    #[test]
    fn filter_input_validates_before_dispatch() {
        let api = Arc::new(FakeApi::paged(1));
        let mut app = app_with(api);

        app.begin_filter_input(FilterField::RatingMin);
        app.filter_input = "11".into();
        app.commit_filter_input();
        assert_eq!(app.criteria().rating_min, None);
        assert!(app.notice.is_some());
        assert_eq!(app.input_mode, InputMode::Normal);

        app.begin_filter_input(FilterField::RatingMin);
        app.filter_input = "6.5".into();
        app.commit_filter_input();
        assert_eq!(app.criteria().rating_min, Some(6.5));
        assert!(app.notice.is_none());

        app.begin_filter_input(FilterField::RatingMin);
        assert_eq!(app.filter_input, "6.5");
        app.filter_input.clear();
        app.commit_filter_input();
        assert_eq!(app.criteria().rating_min, None);
    }

    #[test]
    fn selection_is_clamped_to_visible_cards() {
        let api = Arc::new(FakeApi::paged(1));
        let mut app = app_with(api);
        tick(&mut app);
        for _ in 0..10 {
            app.next_row();
        }
        assert_eq!(app.selected_movie_index, VISIBLE_CARDS - 1);
        app.previous_row();
        assert_eq!(app.selected_movie_index, VISIBLE_CARDS - 1 - GRID_COLUMNS);
        for _ in 0..40 {
            app.previous_movie();
        }
        assert_eq!(app.selected_movie_index, 0);
    }

    #[test]
    fn without_token_nothing_is_fetched() {
        let mut app = App::new(&config(), None, Route::Listing);
        app.sync();
        assert!(!app.has_api());
        assert_eq!(app.listing_view().status, ListingStatus::Loading);
    }
}
