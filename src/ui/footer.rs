use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::route::Route;
use crate::app::{App, InputMode};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    if !app.has_api() {
        return "(q) to quit";
    }
    match app.input_mode {
        InputMode::Search => "(Enter) to search, (Ctrl-U) to clear, (Esc) to stop typing",
        InputMode::Filter(_) => "(Enter) to apply, empty to clear, (Esc) to cancel",
        InputMode::Normal => match app.route {
            Route::Listing => {
                "(/) search, (x) clear, (g/G) genre, (y) year, (n/m) min/max rating, (c) reset, ([/]) page, (Enter) open, (r) retry, (q) quit"
            }
            Route::Detail(_) => "(Esc/b) back, (r) refresh, (q) quit",
        },
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let mut spans = Vec::new();
    if let Some(notice) = &app.notice {
        spans.push(Span::styled(notice.as_str(), Style::default().fg(Color::Red)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        get_instruction_text(app),
        Style::default().fg(Color::Gray),
    ));

    let bottom = Paragraph::new(Line::from(spans)).block(bottom_block);

    frame.render_widget(bottom, area);
}
