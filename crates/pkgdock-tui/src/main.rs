//! pkgdock TUI - Terminal package browser
//!
//! Ratatui-based panel listing packages from a Unity package registry and a
//! Verdaccio server.

mod app;
mod ui;
mod view;

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pkgdock_core::catalog::Aggregator;
use pkgdock_core::config::ConfigStore;
use pkgdock_core::registry::RegistryClient;
use pkgdock_core::view::Tab;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{App, MAX_LIST_WIDTH, MIN_LIST_WIDTH, UiOptions};

#[derive(Debug, Parser)]
#[command(name = "pkgdock", version, about = "Browse packages from Unity and Verdaccio registries")]
struct Args {
    /// Registry config file (defaults to pkgdock.json next to the executable)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Width of the package list pane in percent
    #[arg(
        long,
        value_name = "PERCENT",
        default_value_t = 40,
        value_parser = clap::value_parser!(u16)
            .range(i64::from(MIN_LIST_WIDTH)..=i64::from(MAX_LIST_WIDTH))
    )]
    list_width: u16,

    /// Tab shown on startup (all, unity or verdaccio)
    #[arg(long, value_name = "TAB", default_value_t = Tab::All)]
    tab: Tab,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let store = match args.config {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::from_default_location()?,
    };

    // The alternate screen owns stdout, so logs go to a file beside the config.
    init_tracing(&store.config_path().with_extension("log"));

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("pkgdock requires an interactive terminal (TTY)");
    }

    let loaded = store.load();
    tracing::info!(
        path = %store.config_path().display(),
        origin = ?loaded.origin,
        "loaded registry config"
    );

    let aggregator = Aggregator::new(RegistryClient::http()?, loaded.urls);
    let mut app = App::new(aggregator, UiOptions::new(args.list_width, args.tab))?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app::run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn init_tracing(log_path: &Path) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pkgdock_tui=debug,pkgdock_core=debug,info".into());

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        Err(_) => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
            .init(),
    }
}
