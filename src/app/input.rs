use thiserror::Error;

pub const MIN_YEAR: i32 = 1900;

/// Rejected text typed into a filter field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("year must be between {min} and {max}")]
    YearOutOfRange { min: i32, max: i32 },

    #[error("rating must be between 0 and 10")]
    RatingOutOfRange,
}

/// Which filter field a text prompt is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Year,
    RatingMin,
    RatingMax,
}

impl FilterField {
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Year => "Year",
            FilterField::RatingMin => "Min rating",
            FilterField::RatingMax => "Max rating",
        }
    }
}

/// Blank input clears the filter.
pub fn parse_year(raw: &str, current_year: i32) -> Result<Option<i32>, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let year: i32 = raw
        .parse()
        .map_err(|_| InputError::NotANumber(raw.to_string()))?;
    if !(MIN_YEAR..=current_year).contains(&year) {
        return Err(InputError::YearOutOfRange {
            min: MIN_YEAR,
            max: current_year,
        });
    }
    Ok(Some(year))
}

pub fn parse_rating(raw: &str) -> Result<Option<f32>, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let rating: f32 = raw
        .parse()
        .map_err(|_| InputError::NotANumber(raw.to_string()))?;
    if !rating.is_finite() || !(0.0..=10.0).contains(&rating) {
        return Err(InputError::RatingOutOfRange);
    }
    Ok(Some(rating))
}
