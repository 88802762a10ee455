use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gomoku::config::{AppConfig, LoggingConfig, UiConfig};
use gomoku::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Two-player Gomoku (five in a row) in the terminal.
#[derive(Parser)]
#[command(name = "gomoku", about = "Play five in a row on a 15x15 board")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "gomoku.toml")]
    config: PathBuf,

    /// Override the log file location
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Keyboard only; leave the mouse to the terminal
    #[arg(long)]
    no_mouse: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(log_file) = cli.log_file {
        config.logging.file = log_file;
    }
    if cli.no_mouse {
        config.ui.mouse = false;
    }
    config.validate()?;

    init_logging(&config.logging)?;
    info!(
        config = %cli.config.display(),
        mouse = config.ui.mouse,
        "starting gomoku"
    );

    let res = run(config.ui);
    match &res {
        Ok(()) => info!("exited cleanly"),
        Err(err) => error!(error = %err, "terminal error"),
    }
    res.context("running terminal UI")
}

/// Send tracing output to a file so it never draws over the board.
/// `RUST_LOG` takes precedence over the configured filter.
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let log_file = File::create(&logging.file)
        .with_context(|| format!("creating log file {}", logging.file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .with_context(|| format!("parsing log filter '{}'", logging.filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

fn run(ui: UiConfig) -> io::Result<()> {
    let mouse = ui.mouse;

    // Setup terminal. The guard restores it on every exit path from here on,
    // including a failed setup step.
    enable_raw_mode()?;
    let _restore = RestoreGuard::new(move || restore_terminal(mouse));

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(ui);
    app.run(&mut terminal)
}

/// Undo everything `run` set up. Errors are ignored; there is nothing left
/// to report them to.
fn restore_terminal(mouse: bool) {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    if mouse {
        let _ = execute!(stdout, DisableMouseCapture);
    }
    let _ = execute!(stdout, LeaveAlternateScreen, Show);
}

/// Runs its closure once when dropped.
struct RestoreGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        RestoreGuard {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}
