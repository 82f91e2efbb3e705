/// The two addressable screens: `/` and `/movie/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing,
    /// Raw `{id}` segment; validated by the detail screen, not here.
    Detail(String),
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Some(Route::Listing);
        }
        let rest = trimmed.strip_prefix("/movie/")?;
        let id = rest.strip_suffix('/').unwrap_or(rest);
        if id.contains('/') {
            return None;
        }
        Some(Route::Detail(id.to_string()))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Listing => "/".to_string(),
            Route::Detail(id) => format!("/movie/{}", id),
        }
    }

    pub fn movie(id: u64) -> Route {
        Route::Detail(id.to_string())
    }
}

/// A detail route parameter is only usable when it is a plain decimal id.
pub fn parse_movie_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_patterns() {
        assert_eq!(Route::parse("/"), Some(Route::Listing));
        assert_eq!(Route::parse(""), Some(Route::Listing));
        assert_eq!(Route::parse("/movie/603"), Some(Route::Detail("603".into())));
        assert_eq!(Route::parse("/movie/abc"), Some(Route::Detail("abc".into())));
        assert_eq!(Route::parse("/movie/"), Some(Route::Detail(String::new())));
        assert_eq!(Route::parse("/tv/1"), None);
        assert_eq!(Route::parse("/movie/1/credits"), None);
    }

    #[test]
    fn path_round_trips() {
        assert_eq!(Route::movie(603).path(), "/movie/603");
        assert_eq!(Route::parse(&Route::movie(603).path()), Some(Route::movie(603)));
        assert_eq!(Route::Listing.path(), "/");
    }

    #[test]
    fn movie_id_must_be_an_integer() {
        assert_eq!(parse_movie_id("603"), Some(603));
        assert_eq!(parse_movie_id("abc"), None);
        assert_eq!(parse_movie_id(""), None);
        assert_eq!(parse_movie_id("12.5"), None);
        assert_eq!(parse_movie_id("-4"), None);
        assert_eq!(parse_movie_id("99999999999999999999999"), None);
    }
}
