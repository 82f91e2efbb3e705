use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::filters::rating_text;
use crate::app::input::FilterField;
use crate::app::{App, InputMode};

const CURSOR: &str = "▏";

fn field_block(title: &str, editing: bool) -> Block<'_> {
    let border = if editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}

/// Text shown inside one filter box; the live buffer while it is being edited
fn field_line(app: &App, field: FilterField, value: Option<String>) -> Line<'static> {
    if app.input_mode == InputMode::Filter(field) {
        return Line::from(vec![
            Span::styled(app.filter_input.clone(), Style::default().fg(Color::Yellow)),
            Span::raw(CURSOR),
        ]);
    }
    match value {
        Some(v) => Line::from(Span::styled(v, Style::default().fg(Color::White))),
        None => Line::from(Span::styled("Any", Style::default().fg(Color::DarkGray))),
    }
}

/// Renders the search box and the discover filters above the grid
pub fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(24),    // Search
            Constraint::Length(24), // Genre
            Constraint::Length(10), // Year
            Constraint::Length(14), // Min rating
            Constraint::Length(14), // Max rating
        ])
        .split(area);

    let criteria = app.criteria();
    let searching = app.input_mode == InputMode::Search;

    // Search box: the draft while typing, otherwise the submitted term
    let search_line = if searching {
        Line::from(vec![
            Span::styled(app.listing.draft.clone(), Style::default().fg(Color::Yellow)),
            Span::raw(CURSOR),
        ])
    } else if app.listing.search.trim().is_empty() {
        Line::from(Span::styled(
            "Search movies... (/)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            app.listing.search.clone(),
            Style::default().fg(Color::White),
        ))
    };
    frame.render_widget(
        Paragraph::new(search_line).block(field_block("Search", searching)),
        chunks[0],
    );

    let genre_line = match criteria.genre_id {
        Some(id) => Line::from(Span::styled(
            app.genre_name(id),
            Style::default().fg(Color::Cyan),
        )),
        None => Line::from(Span::styled("All", Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(
        Paragraph::new(genre_line).block(field_block("Genre (g/G)", false)),
        chunks[1],
    );

    let fields = [
        (FilterField::Year, criteria.year.map(|y| y.to_string()), "Year (y)"),
        (
            FilterField::RatingMin,
            criteria.rating_min.map(rating_text),
            "Min (n)",
        ),
        (
            FilterField::RatingMax,
            criteria.rating_max.map(rating_text),
            "Max (m)",
        ),
    ];
    for ((field, value, title), chunk) in fields.into_iter().zip(chunks[2..].iter()) {
        let editing = app.input_mode == InputMode::Filter(field);
        frame.render_widget(
            Paragraph::new(field_line(app, field, value)).block(field_block(title, editing)),
            *chunk,
        );
    }
}
