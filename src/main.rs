//! GIN Admin - Terminal client for the GIN administration API
//!
//! A Ratatui-based TUI for creating formations, stages, realisations,
//! partners and services through authenticated JSON requests.

mod api;
mod app;
mod config;
mod logging;
mod platform;
mod state;
mod storage;
mod ui;

use anyhow::Result;
use app::App;
use clap::Parser;
use config::{Overrides, Settings, TuiConfig};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gin-admin", version, about = "Terminal client for the GIN administration API")]
struct Cli {
    /// Route to open at startup, e.g. /login or /add-formation
    route: Option<String>,

    /// Base URL of the GIN API
    #[arg(long, env = "GIN_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "GIN_API_TIMEOUT")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init_logging();

    let config = TuiConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config file: {e}");
        TuiConfig::default()
    });
    let settings = Settings::resolve(
        &config,
        Overrides {
            api_base_url: cli.api_url,
            request_timeout_secs: cli.timeout,
            route: cli.route,
        },
    );

    // Build the app before touching the terminal so setup errors print normally
    let mut app = App::new(&settings)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Returning (not exiting) lets the log guard flush
    if let Err(err) = &result {
        tracing::error!("Exiting after error: {err:#}");
    }

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply finished requests before drawing
        app.poll_submissions();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll faster while a request is pending so the result shows promptly
        let poll_duration = if app.is_submitting() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                app.handle_key(key);
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
