use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::loading::render_loading;
use super::movie_card::render_movie_card;
use super::paginator::render_paginator;
use super::search_bar::render_search_bar;
use crate::app::error::ApiError;
use crate::app::listing::{ListingStatus, Mode, VISIBLE_CARDS};
use crate::app::models::MovieSummary;
use crate::app::{App, GRID_COLUMNS};

/// Renders the listing screen: filters on top, then the grid for the active mode
pub fn render_main_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search and filters
            Constraint::Min(1),    // Grid
            Constraint::Length(3), // Pagination
        ])
        .split(area);

    render_search_bar(frame, app, chunks[0]);

    let view = app.listing_view();
    match &view.status {
        ListingStatus::Loading => {
            let body = chunks[1].union(chunks[2]);
            render_loading(frame, &mut app.throbber_state, body);
            return;
        }
        ListingStatus::Failed(err) => {
            let body = chunks[1].union(chunks[2]);
            render_failure(frame, view.mode, err, body);
            return;
        }
        ListingStatus::Ready(_) => {}
    }

    let title = format!("{} - {}", view.mode.title(), view.paginator().label());
    match view.empty_message() {
        Some(message) => render_empty(frame, &title, &message, chunks[1]),
        None => render_grid(frame, &title, view.visible(), app.selected_movie_index, chunks[1]),
    }
    render_paginator(frame, &view.paginator(), &mut app.throbber_state, chunks[2]);
}

fn render_grid(
    frame: &mut Frame,
    title: &str,
    movies: &[MovieSummary],
    selected: usize,
    area: Rect,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row_count = VISIBLE_CARDS.div_ceil(GRID_COLUMNS);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
        .split(inner);

    for (row_index, (row_area, chunk)) in rows.iter().zip(movies.chunks(GRID_COLUMNS)).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);
        for (column, (cell, movie)) in cells.iter().zip(chunk).enumerate() {
            let index = row_index * GRID_COLUMNS + column;
            render_movie_card(frame, movie, index == selected, *cell);
        }
    }
}

fn render_empty(frame: &mut Frame, title: &str, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().title(title).borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_failure(frame: &mut Frame, mode: Mode, error: &ApiError, area: Rect) {
    let hint = if error.is_transport() {
        "Check your network connection."
    } else {
        "TMDB rejected the request."
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            mode.failure_message(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
        Line::from(Span::styled(hint, Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(Span::styled(
            "Press (r) to retry",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().title("Error").borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
