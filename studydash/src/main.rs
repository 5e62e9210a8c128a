//! `StudyDash`: terminal study dashboard.
//!
//! Shows the current time, a study stopwatch, a task list and a list of
//! study links. State is saved to the data directory after every change
//! and restored on the next launch; a stopwatch left running keeps
//! counting while the dashboard is closed.
//!
//! ```bash
//! cargo run --bin studydash
//!
//! # Keep state somewhere else, or nowhere
//! cargo run --bin studydash -- --data-dir ./study-data
//! cargo run --bin studydash -- --ephemeral
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::MissedTickBehavior;
use tracing_appender::non_blocking::WorkerGuard;

use studydash::app::App;
use studydash::clock::SystemClock;
use studydash::config::{CliArgs, DashConfig};
use studydash::store::{FileStore, InMemoryStore, KvStore};
use studydash::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match DashConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            DashConfig::from_cli(&cli)
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("studydash starting");

    let store = open_store(&config);

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, store, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("studydash exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("studydash.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Picks the snapshot store. Falls back to memory if the data directory is
/// unusable, so the dashboard still runs.
fn open_store(config: &DashConfig) -> Arc<dyn KvStore> {
    if config.ephemeral {
        tracing::info!("ephemeral mode, state will not be saved");
        return Arc::new(InMemoryStore::new());
    }
    let Some(dir) = config.data_dir.as_deref() else {
        tracing::warn!("no data directory available, state will not be saved");
        return Arc::new(InMemoryStore::new());
    };
    match FileStore::open(dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to in-memory store");
            Arc::new(InMemoryStore::new())
        }
    }
}

/// Main application loop: redraw, then wait for either a tick or a key.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: Arc<dyn KvStore>,
    config: &DashConfig,
) -> io::Result<()> {
    let mut app = App::new(store, Arc::new(SystemClock), config);

    let mut ticker = tokio::time::interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        tokio::select! {
            _ = ticker.tick() => app.tick(),
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key_event(key);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },
        }

        if app.should_quit {
            // Bring the stopwatch up to date so the saved record is current.
            app.tick();
            return Ok(());
        }
    }
}
