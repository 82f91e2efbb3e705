use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};

use crate::app::listing::Paginator;

fn button_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Renders the page controls under the grid, with a spinner while the next page loads
pub fn render_paginator(
    frame: &mut Frame,
    paginator: &Paginator,
    throbber_state: &mut ThrobberState,
    area: Rect,
) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(14)])
        .split(inner);

    let controls = Line::from(vec![
        Span::styled("◀ Previous [", button_style(paginator.can_prev())),
        Span::raw("   "),
        Span::styled(paginator.label(), Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled("] Next ▶", button_style(paginator.can_next())),
    ]);
    frame.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center),
        chunks[0],
    );

    if paginator.fetching {
        let throbber = Throbber::default()
            .label("Updating…")
            .style(Style::default().fg(Color::Gray))
            .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .throbber_set(BRAILLE_SIX);
        frame.render_stateful_widget(throbber, chunks[1], throbber_state);
    }
}
