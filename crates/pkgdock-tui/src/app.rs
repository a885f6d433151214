//! Application state and event loop

use std::io::Stdout;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use pkgdock_core::catalog::{Aggregator, PackageCatalog};
use pkgdock_core::presenter::{Presenter, RefreshTicket};
use pkgdock_core::view::{Tab, ViewEvent};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};

use crate::ui;
use crate::view::TerminalView;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub const MIN_LIST_WIDTH: u16 = 20;
pub const MAX_LIST_WIDTH: u16 = 80;

/// Layout settings fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct UiOptions {
    list_width: u16,
    initial_tab: Tab,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            list_width: 40,
            initial_tab: Tab::All,
        }
    }
}

impl UiOptions {
    pub fn new(list_width: u16, initial_tab: Tab) -> Self {
        Self {
            list_width: list_width.clamp(MIN_LIST_WIDTH, MAX_LIST_WIDTH),
            initial_tab,
        }
    }

    /// Width of the package list pane, in percent of the window.
    pub fn list_width(&self) -> u16 {
        self.list_width
    }

    pub fn initial_tab(&self) -> Tab {
        self.initial_tab
    }
}

type RefreshResult = (RefreshTicket, PackageCatalog);

pub struct App {
    pub presenter: Presenter<TerminalView>,
    pub list_state: ListState,
    pub options: UiOptions,
    aggregator: Arc<Aggregator>,
    runtime: tokio::runtime::Runtime,
    results_tx: Sender<RefreshResult>,
    results_rx: Receiver<RefreshResult>,
    should_quit: bool,
}

impl App {
    pub fn new(aggregator: Aggregator, options: UiOptions) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let (results_tx, results_rx) = mpsc::channel();

        let mut presenter = Presenter::new(TerminalView::default());
        presenter.select_tab(options.initial_tab());

        Ok(Self {
            presenter,
            list_state: ListState::default(),
            options,
            aggregator: Arc::new(aggregator),
            runtime,
            results_tx,
            results_rx,
            should_quit: false,
        })
    }

    /// Kick off a refresh; the result is applied by [`App::poll_results`].
    pub fn refresh(&mut self) {
        let ticket = self.presenter.begin_refresh();
        self.spawn_fetch(ticket);
    }

    fn spawn_fetch(&self, ticket: RefreshTicket) {
        let aggregator = Arc::clone(&self.aggregator);
        let tx = self.results_tx.clone();
        self.runtime.spawn(async move {
            let catalog = aggregator.fetch_all().await;
            // Receiver is gone only when the app is shutting down.
            let _ = tx.send((ticket, catalog));
        });
    }

    /// Apply finished fetches on the UI thread.
    fn poll_results(&mut self) {
        while let Ok((ticket, catalog)) = self.results_rx.try_recv() {
            if self.presenter.complete_refresh(ticket, catalog) {
                tracing::info!(
                    packages = self.presenter.catalog().len(),
                    "package list updated"
                );
            }
            self.sync_list_state();
        }
    }

    fn dispatch(&mut self, event: ViewEvent) {
        match self.presenter.handle(event) {
            Ok(Some(ticket)) => self.spawn_fetch(ticket),
            Ok(None) => {}
            Err(err) => tracing::warn!("{}", err.report()),
        }
        self.sync_list_state();
    }

    fn sync_list_state(&mut self) {
        self.list_state.select(self.presenter.selected_position());
    }

    fn move_selection(&mut self, forward: bool) {
        let len = self.presenter.displayed().len();
        if len == 0 {
            return;
        }
        let next = match self.presenter.selected_position() {
            None => 0,
            Some(pos) if forward => (pos + 1).min(len - 1),
            Some(pos) => pos.saturating_sub(1),
        };
        self.dispatch(ViewEvent::PackageSelected(Some(next)));
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.presenter.selected_package().is_some() {
                    self.dispatch(ViewEvent::PackageSelected(None));
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('r') => self.dispatch(ViewEvent::RefreshClicked),
            KeyCode::Char('1') => self.dispatch(ViewEvent::TabSelected(Tab::All)),
            KeyCode::Char('2') => self.dispatch(ViewEvent::TabSelected(Tab::Unity)),
            KeyCode::Char('3') => self.dispatch(ViewEvent::TabSelected(Tab::Verdaccio)),
            KeyCode::Tab => {
                let tab = self.presenter.current_tab().next();
                self.dispatch(ViewEvent::TabSelected(tab));
            }
            KeyCode::BackTab => {
                let tab = self.presenter.current_tab().previous();
                self.dispatch(ViewEvent::TabSelected(tab));
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            _ => {}
        }
    }
}

pub fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    app.refresh();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code, key.modifiers);
        }

        app.poll_results();

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use pkgdock_core::config::RegistryUrls;
    use pkgdock_core::registry::{RegistryClient, VerdaccioPackageRecord};

    use super::*;

    fn app(options: UiOptions) -> App {
        // Unconfigured URLs keep every fetch off the network.
        let urls = RegistryUrls {
            unity_registry_url: None,
            verdaccio_search_url: None,
        };
        let aggregator = Aggregator::new(RegistryClient::http().unwrap(), urls);
        App::new(aggregator, options).unwrap()
    }

    fn catalog(names: &[&str]) -> PackageCatalog {
        PackageCatalog::from_records(
            Vec::new(),
            names.iter().map(|name| VerdaccioPackageRecord {
                name: name.to_string(),
                display_name: Some(name.to_string()),
                description: None,
                version: Some("1.0.0".to_string()),
            }),
        )
    }

    fn loaded(names: &[&str]) -> App {
        let mut app = app(UiOptions::default());
        let ticket = app.presenter.begin_refresh();
        app.results_tx.send((ticket, catalog(names))).unwrap();
        app.poll_results();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(code, KeyModifiers::NONE);
    }

    #[test]
    fn test_ui_options_clamp_list_width() {
        assert_eq!(UiOptions::new(150, Tab::All).list_width(), MAX_LIST_WIDTH);
        assert_eq!(UiOptions::new(0, Tab::All).list_width(), MIN_LIST_WIDTH);
        assert_eq!(UiOptions::new(55, Tab::All).list_width(), 55);
    }

    #[test]
    fn test_initial_tab_applied() {
        let app = app(UiOptions::new(40, Tab::Verdaccio));
        assert_eq!(app.presenter.current_tab(), Tab::Verdaccio);
    }

    #[test]
    fn test_poll_results_discards_stale_refresh() {
        let mut app = app(UiOptions::default());
        let stale = app.presenter.begin_refresh();
        let current = app.presenter.begin_refresh();

        app.results_tx.send((current, catalog(&["Fresh"]))).unwrap();
        app.results_tx.send((stale, catalog(&["Old", "Older"]))).unwrap();
        app.poll_results();

        assert!(!app.presenter.is_loading());
        let displayed = app.presenter.displayed();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].name(), "Fresh");
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn test_move_selection_clamps_to_list() {
        let mut app = loaded(&["A", "B"]);

        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.presenter.selected_position(), Some(1));
        assert_eq!(app.list_state.selected(), Some(1));

        for _ in 0..3 {
            press(&mut app, KeyCode::Char('k'));
        }
        assert_eq!(app.presenter.selected_position(), Some(0));
    }

    #[test]
    fn test_move_selection_on_empty_list_is_noop() {
        let mut app = loaded(&[]);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.presenter.selected_position(), None);
    }

    #[test]
    fn test_esc_clears_selection_before_quitting() {
        let mut app = loaded(&["A"]);
        press(&mut app, KeyCode::Down);
        assert!(app.presenter.selected_package().is_some());

        press(&mut app, KeyCode::Esc);
        assert!(app.presenter.selected_package().is_none());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_keys_cycle_tabs() {
        let mut app = loaded(&["A"]);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.presenter.current_tab(), Tab::Unity);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.presenter.current_tab(), Tab::All);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.presenter.current_tab(), Tab::Verdaccio);
    }
}
