use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use throbber_widgets_tui::{Throbber, ThrobberState};

const SKELETON_ROWS: usize = 2;
const SKELETON_COLUMNS: usize = 6;

/// Renders placeholder cards while the first page of a listing loads
pub fn render_loading(frame: &mut Frame, throbber_state: &mut ThrobberState, area: Rect) {
    let loading_block = Block::default()
        .title("Loading Movies")
        .borders(Borders::ALL)
        .style(Style::default());
    let inner = loading_block.inner(area);
    frame.render_widget(loading_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let throbber = Throbber::default()
        .label("Loading movie data...")
        .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(throbber, chunks[0], throbber_state);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, SKELETON_ROWS as u32); SKELETON_ROWS])
        .split(chunks[1]);

    for row in rows.iter() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, SKELETON_COLUMNS as u32); SKELETON_COLUMNS])
            .split(*row);
        for cell in cells.iter() {
            let bars = vec![
                Line::from(Span::styled("▒▒▒▒▒▒▒▒", Style::default().fg(Color::DarkGray))),
                Line::from(Span::styled("▒▒▒", Style::default().fg(Color::DarkGray))),
                Line::from(Span::styled("▒▒▒▒▒", Style::default().fg(Color::DarkGray))),
            ];
            let card = Paragraph::new(bars).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(card, *cell);
        }
    }
}
