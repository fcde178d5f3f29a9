//! Strictly Impostor - terminal shell
//!
//! One terminal, passed from player to player.

#![warn(missing_docs)]

mod app;
mod cli;
mod screen;
mod screens;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use strictly_impostor::{FileStore, SessionController, WordBank};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::App;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log to a file; stdout belongs to the UI.
    let log_file = std::fs::File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting Strictly Impostor");

    let bank = match &cli.words {
        Some(path) => WordBank::from_file(path)
            .with_context(|| format!("Failed to load word bank {}", path.display()))?,
        None => WordBank::builtin(),
    };
    let store = FileStore::open(&cli.settings);
    info!(settings = %store.path().display(), "Settings store opened");
    let controller = match cli.seed {
        Some(seed) => SessionController::with_seed(bank, store, seed),
        None => SessionController::new(bank, store),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller);
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "Terminal session failed");
    }
    info!(phase = %app.controller().phase(), "Strictly Impostor exiting");
    result
}
