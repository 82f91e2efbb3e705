use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::app::route::Route;

/// Renders the header/title block at the top of the screen
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default());

    let heading = match app.route {
        Route::Listing => app.mode().title(),
        Route::Detail(_) => "Movie details",
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Cine Discover",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(heading, Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(app.route.path(), Style::default().fg(Color::DarkGray)),
    ]))
    .block(title_block);

    frame.render_widget(title, area);
}
