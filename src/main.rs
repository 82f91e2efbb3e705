mod app;
mod config;
mod logging;
mod ui;

use std::io::{self, Stderr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ratatui::Terminal;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use ratatui_image::picker::Picker;
use tracing::{info, warn};

use crate::app::filters::FilterAction;
use crate::app::input::FilterField;
use crate::app::listing::ListingAction;
use crate::app::route::Route;
use crate::app::tmdb::{MovieApi, TmdbClient};
use crate::app::{Action, App, InputMode};
use crate::config::Config;

fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let _guard = logging::init_tracing()?;
    match dotenv {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => info!("No .env file loaded ({}) - relying on environment", e),
    }

    let config = Config::from_env()?;
    let start = match std::env::args().nth(1) {
        Some(path) => Route::parse(&path)
            .with_context(|| format!("Unknown route {:?}, expected / or /movie/{{id}}", path))?,
        None => Route::Listing,
    };

    let api: Option<Arc<dyn MovieApi>> = match &config.api_token {
        Some(token) => Some(Arc::new(TmdbClient::new(&config, token.as_str())?)),
        None => {
            warn!("TMDB_TOKEN is not set; metadata requests are disabled");
            None
        }
    };

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // This is a special case. Normally using stdout is fine
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let picker = Picker::from_query_stdio().unwrap_or_else(|e| {
        warn!("Terminal graphics query failed ({:?}), using half blocks", e);
        Picker::halfblocks()
    });

    // create app and run it
    let mut app = App::new(&config, api, start).with_picker(picker);
    info!(route = %app.route.path(), "starting");
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stderr>>, app: &mut App) -> Result<()> {
    loop {
        // Apply finished fetches, then issue whatever the current screen still needs
        app.pump();
        app.sync();

        terminal.draw(|f| ui::ui(f, app))?;
        app.throbber_state.calc_next();

        // Poll for events with a timeout to allow UI updates
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns true when the user asked to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.input_mode {
        InputMode::Search => {
            match key.code {
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.dispatch(Action::Listing(ListingAction::SetDraft(String::new())))
                }
                KeyCode::Char(c) => app.dispatch(Action::Listing(ListingAction::PushDraft(c))),
                KeyCode::Backspace => app.dispatch(Action::Listing(ListingAction::PopDraft)),
                KeyCode::Enter => {
                    app.dispatch(Action::Listing(ListingAction::SubmitSearch));
                    app.input_mode = InputMode::Normal;
                }
                KeyCode::Esc => app.input_mode = InputMode::Normal,
                _ => {}
            }
            return false;
        }
        InputMode::Filter(_) => {
            match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => app.filter_input.push(c),
                KeyCode::Backspace => {
                    app.filter_input.pop();
                }
                KeyCode::Enter => app.commit_filter_input(),
                KeyCode::Esc => app.cancel_input(),
                _ => {}
            }
            return false;
        }
        InputMode::Normal => {}
    }

    match app.route {
        Route::Listing => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') | KeyCode::Char('s') => {
                app.notice = None;
                app.input_mode = InputMode::Search;
            }
            KeyCode::Char('x') => app.dispatch(Action::Listing(ListingAction::ClearSearch)),
            KeyCode::Char('g') => app.cycle_genre(true),
            KeyCode::Char('G') => app.cycle_genre(false),
            KeyCode::Char('y') => app.begin_filter_input(FilterField::Year),
            KeyCode::Char('n') => app.begin_filter_input(FilterField::RatingMin),
            KeyCode::Char('m') => app.begin_filter_input(FilterField::RatingMax),
            KeyCode::Char('c') => app.dispatch(Action::Filter(FilterAction::Reset)),
            KeyCode::Char('[') | KeyCode::PageUp => {
                app.dispatch(Action::Listing(ListingAction::PreviousPage))
            }
            KeyCode::Char(']') | KeyCode::PageDown => {
                app.dispatch(Action::Listing(ListingAction::NextPage))
            }
            KeyCode::Char('r') => app.dispatch(Action::Retry),
            KeyCode::Right | KeyCode::Char('l') => app.next_movie(),
            KeyCode::Left | KeyCode::Char('h') => app.previous_movie(),
            KeyCode::Down | KeyCode::Char('j') => app.next_row(),
            KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
            KeyCode::Enter => app.open_selected(),
            _ => {}
        },
        Route::Detail(_) => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => app.dispatch(Action::Back),
            KeyCode::Char('r') => app.dispatch(Action::Retry),
            _ => {}
        },
    }
    false
}
