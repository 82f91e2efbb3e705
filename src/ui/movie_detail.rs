use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};
use throbber_widgets_tui::{Throbber, ThrobberState};

use super::rating_color;
use crate::app::App;
use crate::app::detail::DetailStatus;
use crate::app::error::ApiError;
use crate::app::models::MovieFull;
use crate::app::utils::format_rating;

const POSTER_WIDTH: u16 = 36;

/// Renders the movie detail screen
pub fn render_movie_detail(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.detail_status() {
        None => {}
        Some(DetailStatus::InvalidId) => render_invalid_id(frame, area),
        Some(DetailStatus::Loading) => render_loading_state(frame, &mut app.throbber_state, area),
        Some(DetailStatus::Failed(err)) => render_error_state(frame, area, &err),
        Some(DetailStatus::Ready(movie)) => render_movie_info(frame, area, app, &movie),
    }
}

/// Renders loading state with spinner
fn render_loading_state(frame: &mut Frame, throbber_state: &mut ThrobberState, area: Rect) {
    let loading_block = Block::default()
        .title("Movie Details")
        .borders(Borders::ALL)
        .style(Style::default());
    let inner = loading_block.inner(area);
    frame.render_widget(loading_block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(30),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    let throbber = Throbber::default()
        .label("Fetching movie details...")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(throbber, columns[1], throbber_state);
}

fn render_invalid_id(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Invalid movie id",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Movie routes look like /movie/603",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press (Esc) or (b) to go back",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().title("Movie Details").borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Renders error state
fn render_error_state(frame: &mut Frame, area: Rect, error: &ApiError) {
    let mut error_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Could not load this movie.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
    ];

    let reasons: &[&str] = match error {
        ApiError::Status { status: 404, .. } => &["- TMDB has no movie with this id"],
        ApiError::Status { status: 401, .. } => &["- The TMDB token was rejected"],
        ApiError::Transport(_) => &["- Network connection issues", "- TMDB is unreachable"],
        _ => &["- API rate limit reached", "- Unexpected response from TMDB"],
    };
    error_text.push(Line::from(Span::styled(
        "This might happen if:",
        Style::default().fg(Color::Yellow),
    )));
    for reason in reasons {
        error_text.push(Line::from(Span::styled(
            *reason,
            Style::default().fg(Color::White),
        )));
    }
    error_text.push(Line::from(""));
    error_text.push(Line::from(Span::styled(
        "Press (r) to retry, (Esc) or (b) to go back",
        Style::default().fg(Color::Gray),
    )));

    let error_paragraph = Paragraph::new(error_text)
        .block(Block::default().title("Error").borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

/// Renders movie information
fn render_movie_info(frame: &mut Frame, area: Rect, app: &mut App, movie: &MovieFull) {
    let outer_block = Block::default()
        .title(format!("Movie Details - {}", movie.title))
        .borders(Borders::ALL)
        .style(Style::default());

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(POSTER_WIDTH), Constraint::Min(20)])
        .split(inner_area);

    render_poster_section(frame, columns[0], app, movie.poster_path.as_deref());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title info
            Constraint::Min(10),   // Content
        ])
        .split(columns[1]);

    render_title_section(frame, chunks[0], movie);
    render_content_section(frame, chunks[1], movie);
}

/// Renders the poster section
fn render_poster_section(frame: &mut Frame, area: Rect, app: &mut App, path: Option<&str>) {
    let poster_block = Block::default().borders(Borders::ALL).title("Poster");

    if let Some(protocol) = path.and_then(|p| app.poster_for(p)) {
        let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));
        let inner_area = poster_block.inner(area);
        frame.render_widget(poster_block, area);
        frame.render_stateful_widget(image, inner_area, protocol);
        return;
    }

    let message = match path {
        Some(p) if app.poster_loading(p) => Span::styled(
            "Downloading poster...",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        _ => Span::styled("No poster available", Style::default().fg(Color::Gray)),
    };
    let placeholder = Paragraph::new(vec![Line::from(""), Line::from(""), Line::from(message)])
        .alignment(Alignment::Center)
        .block(poster_block);

    frame.render_widget(placeholder, area);
}

/// Renders the title section with basic info
fn render_title_section(frame: &mut Frame, area: Rect, movie: &MovieFull) {
    let mut heading = vec![Span::styled(
        movie.title.as_str(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];
    if let Some(year) = movie.year() {
        heading.push(Span::raw(" "));
        heading.push(Span::styled(format!("({})", year), Style::default().fg(Color::Cyan)));
    }

    let mut facts = vec![
        Span::styled("Rating: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_rating(movie.vote_average),
            Style::default()
                .fg(rating_color(movie.vote_average))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(runtime) = movie.runtime_label() {
        facts.push(Span::raw(" | "));
        facts.push(Span::styled("Runtime: ", Style::default().fg(Color::Gray)));
        facts.push(Span::styled(runtime, Style::default().fg(Color::White)));
    }
    if let Some(genres) = movie.genre_names() {
        facts.push(Span::raw(" | "));
        facts.push(Span::styled(genres, Style::default().fg(Color::White)));
    }

    let title_paragraph = Paragraph::new(vec![Line::from(heading), Line::from(facts)]);
    frame.render_widget(title_paragraph, area);
}

/// Renders the main content section
fn render_content_section(frame: &mut Frame, area: Rect, movie: &MovieFull) {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut content = vec![];

    content.push(Line::from(Span::styled("Synopsis:", label)));
    content.push(Line::from(Span::styled(
        movie.overview_or_placeholder(),
        Style::default().fg(Color::White),
    )));
    content.push(Line::from(""));

    if let Some(director) = movie.director() {
        content.push(Line::from(vec![
            Span::styled("Director: ", label),
            Span::styled(director.name.as_str(), Style::default().fg(Color::White)),
        ]));
        content.push(Line::from(""));
    }

    let cast = movie.top_cast();
    if !cast.is_empty() {
        content.push(Line::from(Span::styled("Cast:", label)));
        for member in cast {
            let photo = if member.profile_path.is_some() { "◉ " } else { "○ " };
            let mut line = vec![
                Span::styled(photo, Style::default().fg(Color::DarkGray)),
                Span::styled(member.name.as_str(), Style::default().fg(Color::White)),
            ];
            if let Some(character) = member.character.as_deref().filter(|c| !c.is_empty()) {
                line.push(Span::styled(
                    format!(" as {}", character),
                    Style::default().fg(Color::Gray),
                ));
            }
            content.push(Line::from(line));
        }
        content.push(Line::from(""));
    }

    let mut origin = Vec::new();
    if let Some(languages) = movie.languages() {
        origin.push(Span::styled("Language: ", Style::default().fg(Color::Gray)));
        origin.push(Span::styled(languages, Style::default().fg(Color::White)));
    }
    if let Some(countries) = movie.countries() {
        if !origin.is_empty() {
            origin.push(Span::raw(" | "));
        }
        origin.push(Span::styled("Country: ", Style::default().fg(Color::Gray)));
        origin.push(Span::styled(countries, Style::default().fg(Color::White)));
    }
    if !origin.is_empty() {
        content.push(Line::from(origin));
    }

    let content_paragraph = Paragraph::new(content).wrap(Wrap { trim: true });

    frame.render_widget(content_paragraph, area);
}
