//! Terminal front end for the CineNow movie catalog.
//!
//! The UI thread owns all screen state; worker threads execute the HTTP
//! round-trips and deliver completions over a channel. The event loop drains
//! that channel, redraws, and polls for input.

mod app;
mod fetch;
mod terminal;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::Context;
use cinenow_core::CatalogClient;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::app::{Action, App};
use crate::fetch::{FetchMessage, Fetcher};

/// Terminal browser for the CineNow movie catalog.
#[derive(Parser, Debug)]
#[command(name = "cinenow", version)]
struct Args {
    /// Catalog API base URL.
    #[arg(
        long,
        env = "CINENOW_BASE_URL",
        default_value = "https://api.themoviedb.org/3"
    )]
    base_url: String,

    /// API key sent as the `api_key` query parameter.
    #[arg(long, env = "CINENOW_API_KEY")]
    api_key: String,

    /// Append logs to this file; without it logging is off, since stdout
    /// belongs to the UI.
    #[arg(long, env = "CINENOW_LOG")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = args.log_file.as_deref().map(init_logging).transpose()?;

    let client = CatalogClient::new(&args.base_url, &args.api_key);
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(Fetcher::new(client, tx));

    let mut term = terminal::init().context("terminal init failed")?;
    let result = event_loop(&mut term, &mut app, &rx);
    terminal::restore(term).context("terminal restore failed")?;
    result
}

fn init_logging(path: &Path) -> anyhow::Result<WorkerGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn event_loop(
    term: &mut terminal::Tui,
    app: &mut App,
    rx: &Receiver<FetchMessage>,
) -> anyhow::Result<()> {
    loop {
        // Land any completed fetches before drawing so a burst of responses
        // renders in a single frame.
        while let Ok(msg) = rx.try_recv() {
            app.on_fetch(msg);
        }

        term.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) == Action::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
