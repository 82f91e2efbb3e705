pub const PLACEHOLDER_IMAGE: &str = "assets/placeholder.jpg";

/// Poster width tier on the image host.
pub const POSTER_SIZE: &str = "w500";

/// Full image URL for an API path, or the local placeholder when there is none.
pub fn image_url(base: &str, size: &str, path: Option<&str>) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}{}", base.trim_end_matches('/'), size, path),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

pub fn format_rating(vote_average: f64) -> String {
    if vote_average.is_finite() {
        format!("{:.1}", vote_average)
    } else {
        "N/A".to_string()
    }
}

pub fn release_label(release_date: Option<&str>) -> &str {
    release_date.filter(|d| !d.is_empty()).unwrap_or("—")
}

pub fn release_year(release_date: Option<&str>) -> Option<&str> {
    release_date
        .and_then(|d| d.get(..4))
        .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
}

pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Cuts `title` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = title.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
