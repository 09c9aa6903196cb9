//! Eureka! fact deck TUI.
//!
//! Browse fun facts one card at a time, filter by category, keep favorites
//! and share the ones you like.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line protocol suitable for automated testing:
//!
//! ```bash
//! printf '#next\n#settle\n#status\n#quit\n' | cargo run -p eureka -- --headless
//! ```

mod app;
mod effects;
mod events;
mod headless;
mod share;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eureka_core::{EurekaConfig, EurekaSession};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use app::App;
use events::{handle_event, EventResult, PendingAction};
use ui::render::render;

/// Upper bound on how long the loop sleeps waiting for input
const MAX_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(name = "eureka", version, about = "Eureka! A deck of fun facts")]
struct Args {
    /// Run the line-oriented headless protocol instead of the TUI
    #[arg(long)]
    headless: bool,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON fact catalog to use instead of the built-in one
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// File that stores favorites between runs
    #[arg(long, value_name = "PATH")]
    favorites: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_file.as_deref(), args.headless)?;

    let config = resolve_config(&args).await?;
    tracing::debug!(?config, "configuration resolved");

    if args.headless {
        return headless::run_headless(config)
            .await
            .context("headless session failed");
    }

    // Terminal cells are much coarser than pixels
    let config = config.clone().with_thresholds(config.thresholds.in_cells());
    let session = EurekaSession::open(&config, share::terminal_chain())
        .await
        .context("failed to open the fact deck")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(session)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result.context("terminal error")
}

/// File, then environment, then command line
async fn resolve_config(args: &Args) -> anyhow::Result<EurekaConfig> {
    let mut config = match &args.config {
        Some(path) => EurekaConfig::load(path)
            .await
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EurekaConfig::default(),
    }
    .with_env();

    if let Some(path) = &args.catalog {
        config = config.with_catalog_path(path);
    }
    if let Some(path) = &args.favorites {
        config = config.with_favorites_path(path);
    }
    Ok(config)
}

/// Logs go to `log_file` when given. Headless runs fall back to stderr; the
/// TUI owns the terminal and stays silent otherwise.
fn init_tracing(log_file: Option<&Path>, headless: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
        }
        None if headless => builder
            .with_writer(io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}")),
        None => Ok(()),
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Wake up in time for the next transition phase or notification expiry
        let timeout = poll_timeout(app.next_deadline(), Instant::now());
        if event::poll(timeout)? {
            match handle_event(&mut app, event::read()?) {
                EventResult::Quit => return Ok(()),
                EventResult::Pending(PendingAction::ToggleFavorite) => {
                    app.toggle_favorite().await;
                }
                EventResult::Pending(PendingAction::Share) => {
                    app.begin_share();
                    terminal.draw(|f| render(f, &app))?;
                    app.share().await;
                }
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn poll_timeout(deadline: Option<Instant>, now: Instant) -> Duration {
    deadline
        .map(|d| d.saturating_duration_since(now))
        .map_or(MAX_POLL, |wait| wait.min(MAX_POLL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_timeout_tracks_deadline() {
        let now = Instant::now();
        assert_eq!(poll_timeout(None, now), MAX_POLL);
        assert_eq!(
            poll_timeout(Some(now + Duration::from_millis(30)), now),
            Duration::from_millis(30)
        );
        assert_eq!(poll_timeout(Some(now + Duration::from_secs(2)), now), MAX_POLL);
        assert_eq!(poll_timeout(Some(now), now + Duration::from_millis(5)), Duration::ZERO);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["eureka", "--headless", "--favorites", "/tmp/favs.json"]);
        assert!(args.headless);
        assert_eq!(args.favorites, Some(PathBuf::from("/tmp/favs.json")));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_second_subscriber_install_is_an_error() {
        init_tracing(None, true).unwrap();
        let err = init_tracing(None, true).unwrap_err();
        assert!(err.to_string().contains("failed to install log subscriber"));

        // the TUI without a log file installs nothing
        assert!(init_tracing(None, false).is_ok());
    }

    #[tokio::test]
    async fn test_cli_overrides_config() {
        let args = Args::parse_from(["eureka", "--catalog", "facts.json"]);
        let config = resolve_config(&args).await.unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("facts.json")));
    }
}
