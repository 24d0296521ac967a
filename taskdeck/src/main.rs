//! `TaskDeck` — terminal task list backed by a remote task store.
//!
//! Launches the TUI and connects to the task store service when one is
//! configured. Configuration via CLI flags, environment variables, or
//! config file (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Offline demo mode
//! cargo run --bin taskdeck
//!
//! # Connect to a store service
//! cargo run --bin taskdeck -- --store-url ws://127.0.0.1:9200/ws
//!
//! # Or via environment variable
//! STORE_URL=ws://127.0.0.1:9200/ws cargo run --bin taskdeck
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::store::{self, StoreClientConfig, StoreCommand, StoreEvent};
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > env > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("taskdeck starting");

    // Build the store coordinator config from resolved settings.
    let store_config = config.to_store_config();

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, store_config, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown to
/// ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
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

/// Main application loop with optional store connection.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store_config: Option<StoreClientConfig>,
    client_config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new().with_clock_refresh(client_config.clock_refresh);

    // Attempt to connect to the store if a URL is configured.
    let (cmd_tx, mut evt_rx) = match store_config {
        Some(config) => match store::spawn_store(config).await {
            Ok((tx, rx)) => {
                // Initial load: the store's list replaces the placeholder data.
                if tx.try_send(StoreCommand::Refresh).is_err() {
                    app.set_status_message("Store busy — initial load skipped".to_string());
                }
                (Some(tx), Some(rx))
            }
            Err(e) => {
                tracing::warn!(error = %e, "store connection failed, running offline");
                app.set_status_message(format!("Offline — showing demo data ({e})"));
                (None, None)
            }
        },
        None => (None, None),
    };

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending StoreEvents (non-blocking).
        if let Some(ref mut rx) = evt_rx {
            drain_store_events(&mut app, rx, cmd_tx.as_ref());
        }

        // Step 3: Tick the clock.
        app.tick_clock();

        // Step 4: Poll for terminal input events.
        if event::poll(client_config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // handle_key_event returns Some(StoreCommand) when the gesture
            // needs a store round trip (submit, toggle, delete).
            if let Some(store_cmd) = app.handle_key_event(key) {
                match cmd_tx {
                    Some(ref tx) => match tx.try_send(store_cmd) {
                        Ok(()) => {}
                        Err(mpsc::error::TrySendError::Full(_)) => {
                            app.set_status_message("Store busy, command dropped".to_string());
                        }
                        Err(mpsc::error::TrySendError::Closed(_)) => {
                            app.set_status_message("Store disconnected".to_string());
                        }
                    },
                    None => {
                        app.set_status_message(
                            "Not connected \u{2014} change not saved".to_string(),
                        );
                    }
                }
            }
        }

        if app.should_quit {
            // Send shutdown command to the store worker.
            if let Some(ref tx) = cmd_tx {
                let _ = tx.try_send(StoreCommand::Shutdown);
            }
            return Ok(());
        }
    }
}

/// Drain all pending `StoreEvent`s and apply them to the app.
///
/// A confirmed mutation answers with a follow-up `Refresh`, dispatched here
/// — only after the mutation's own completion event arrived, so refreshes
/// are never pipelined ahead of the mutation they follow.
fn drain_store_events(
    app: &mut App,
    rx: &mut mpsc::Receiver<StoreEvent>,
    cmd_tx: Option<&mpsc::Sender<StoreCommand>>,
) {
    while let Ok(event) = rx.try_recv() {
        if let Some(follow_up) = app.apply_store_event(event)
            && let Some(tx) = cmd_tx
            && tx.try_send(follow_up).is_err()
        {
            app.set_status_message("Store disconnected".to_string());
        }
    }
}
