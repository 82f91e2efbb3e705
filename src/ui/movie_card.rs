use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::rating_color;
use crate::app::models::MovieSummary;
use crate::app::utils::{format_rating, release_label, truncate};

/// Renders one movie in the listing grid
pub fn render_movie_card(frame: &mut Frame, movie: &MovieSummary, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let width = block.inner(area).width as usize;

    let title_style = if selected {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(Span::styled(truncate(&movie.title, width), title_style)),
        Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format_rating(movie.vote_average),
                Style::default().fg(rating_color(movie.vote_average)),
            ),
        ]),
        Line::from(Span::styled(
            release_label(movie.release_date.as_deref()).to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    if movie.poster_path.is_none() {
        lines.push(Line::from(Span::styled(
            "no poster",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
