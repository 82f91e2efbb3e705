mod footer;
mod header;
mod loading;
mod main_content;
mod movie_card;
mod movie_detail;
mod paginator;
mod search_bar;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_big_text::{BigText, PixelSize};

use crate::app::App;
use crate::app::route::Route;

use footer::render_footer;
use header::render_header;
use main_content::render_main_content;
use movie_detail::render_movie_detail;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    if !app.has_api() {
        render_missing_api_key(frame, chunks[1]);
    } else {
        match app.route {
            Route::Listing => render_main_content(frame, app, chunks[1]),
            Route::Detail(_) => render_movie_detail(frame, app, chunks[1]),
        }
    }

    render_footer(frame, app, chunks[2]);
}

/// Shared colour scale for TMDB vote averages
pub(crate) fn rating_color(vote_average: f64) -> Color {
    if vote_average <= 0.0 {
        Color::Gray
    } else if vote_average >= 7.0 {
        Color::Green
    } else if vote_average >= 5.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Renders missing API token error with big text
fn render_missing_api_key(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Big text
            Constraint::Min(5),    // Instructions
        ])
        .split(area);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .lines(vec!["API KEY".into(), "REQUIRED!".into()])
        .alignment(Alignment::Center)
        .build();

    frame.render_widget(big_text, chunks[0]);

    let instructions = vec![
        Line::from(""),
        Line::from(Span::styled(
            "A TMDB read access token is needed to browse movies",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "1. Create one at: https://www.themoviedb.org/settings/api",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "2. Set environment variable: export TMDB_TOKEN=your_token_here (or add it to .env)",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "3. Restart the application",
            Style::default().fg(Color::White),
        )),
    ];

    let instructions_paragraph = Paragraph::new(instructions)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(instructions_paragraph, chunks[1]);
}
