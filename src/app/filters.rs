/// User-selected discover criteria. `None` means unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterCriteria {
    pub genre_id: Option<u32>,
    pub year: Option<i32>,
    pub rating_min: Option<f32>,
    pub rating_max: Option<f32>,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        self.genre_id.is_some()
            || self.year.is_some()
            || self.rating_min.is_some()
            || self.rating_max.is_some()
    }
}

/// Text form of a rating bound, the same for the request parameter and the filter box.
pub fn rating_text(rating: f32) -> String {
    rating.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterAction {
    SetGenreId(Option<u32>),
    SetYear(Option<i32>),
    SetRatingMin(Option<f32>),
    SetRatingMax(Option<f32>),
    Reset,
}

/// Applies one action, producing the next state. Each setter touches exactly one field.
pub fn reduce(state: FilterCriteria, action: FilterAction) -> FilterCriteria {
    match action {
        FilterAction::SetGenreId(genre_id) => FilterCriteria { genre_id, ..state },
        FilterAction::SetYear(year) => FilterCriteria { year, ..state },
        FilterAction::SetRatingMin(rating_min) => FilterCriteria { rating_min, ..state },
        FilterAction::SetRatingMax(rating_max) => FilterCriteria { rating_max, ..state },
        FilterAction::Reset => FilterCriteria::default(),
    }
}

#[derive(Debug, Default)]
pub struct FilterStore {
    state: FilterCriteria,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FilterCriteria {
        self.state
    }

    /// Returns true when the criteria changed.
    pub fn dispatch(&mut self, action: FilterAction) -> bool {
        let next = reduce(self.state, action);
        let changed = next != self.state;
        self.state = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unconstrained() {
        let store = FilterStore::new();
        assert_eq!(store.state(), FilterCriteria::default());
        assert!(!store.state().is_active());
    }

    #[test]
    fn setters_replace_a_single_field() {
        let state = FilterCriteria {
            genre_id: Some(28),
            year: Some(1999),
            rating_min: Some(6.5),
            rating_max: None,
        };

        let next = reduce(state, FilterAction::SetYear(None));
        assert_eq!(next.year, None);
        assert_eq!(next.genre_id, Some(28));
        assert_eq!(next.rating_min, Some(6.5));

        let next = reduce(next, FilterAction::SetRatingMax(Some(9.0)));
        assert_eq!(next.rating_max, Some(9.0));
        assert_eq!(next.rating_min, Some(6.5));
    }

    #[test]
    fn store_accepts_unvalidated_values() {
        let mut store = FilterStore::new();
        assert!(store.dispatch(FilterAction::SetRatingMin(Some(42.0))));
        assert!(store.dispatch(FilterAction::SetYear(Some(-3))));
        assert_eq!(store.state().rating_min, Some(42.0));
        assert_eq!(store.state().year, Some(-3));
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = FilterStore::new();
        store.dispatch(FilterAction::SetGenreId(Some(18)));
        store.dispatch(FilterAction::SetRatingMax(Some(8.0)));
        assert!(store.state().is_active());

        assert!(store.dispatch(FilterAction::Reset));
        assert_eq!(store.state(), FilterCriteria::default());
        assert!(!store.dispatch(FilterAction::Reset));
    }

    #[test]
    fn any_single_field_activates() {
        let genre = FilterCriteria { genre_id: Some(1), ..Default::default() };
        let year = FilterCriteria { year: Some(2001), ..Default::default() };
        let min = FilterCriteria { rating_min: Some(0.0), ..Default::default() };
        let max = FilterCriteria { rating_max: Some(10.0), ..Default::default() };
        for criteria in [genre, year, min, max] {
            assert!(criteria.is_active());
        }
    }
}
