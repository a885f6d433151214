//! Presenter holding the catalog, tab filter and selection.
//!
//! Frontends own one `Presenter` on their UI thread. Refreshes are split into
//! [`Presenter::begin_refresh`] and [`Presenter::complete_refresh`] so a host
//! can run the fetch wherever it likes and hand the result back; each refresh
//! is stamped with a generation and results from superseded refreshes are
//! dropped.

use chrono::{DateTime, Local};

use crate::catalog::{Aggregator, PackageCatalog, UnifiedPackage};
use crate::error::Error;
use crate::registry::Transport;
use crate::view::{EMPTY_MESSAGE, LOADING_MESSAGE, PackageView, Tab, ViewEvent};

/// Identifies one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "pass the ticket to complete_refresh once the fetch finishes"]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct Presenter<V> {
    view: V,
    catalog: PackageCatalog,
    current_tab: Tab,
    /// Catalog indices visible under the current tab.
    displayed: Vec<usize>,
    /// Catalog index of the selected package.
    selected: Option<usize>,
    generation: u64,
    loading: bool,
    last_updated: Option<DateTime<Local>>,
}

impl<V: PackageView> Presenter<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            catalog: PackageCatalog::empty(),
            current_tab: Tab::All,
            displayed: Vec::new(),
            selected: None,
            generation: 0,
            loading: false,
            last_updated: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn catalog(&self) -> &PackageCatalog {
        &self.catalog
    }

    pub fn current_tab(&self) -> Tab {
        self.current_tab
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Packages visible under the current tab, in catalog order.
    pub fn displayed(&self) -> Vec<&UnifiedPackage> {
        self.displayed
            .iter()
            .filter_map(|&index| self.catalog.get(index))
            .collect()
    }

    pub fn selected_package(&self) -> Option<&UnifiedPackage> {
        self.selected.and_then(|index| self.catalog.get(index))
    }

    /// Position of the selection within the displayed list.
    pub fn selected_position(&self) -> Option<usize> {
        let selected = self.selected?;
        self.displayed.iter().position(|&index| index == selected)
    }

    /// Dispatch a view event. Returns a ticket when a refresh was started.
    pub fn handle(&mut self, event: ViewEvent) -> Result<Option<RefreshTicket>, Error> {
        match event {
            ViewEvent::PackageSelected(position) => {
                self.select_package(position)?;
                Ok(None)
            }
            ViewEvent::TabSelected(tab) => {
                self.select_tab(tab);
                Ok(None)
            }
            ViewEvent::RefreshClicked => Ok(Some(self.begin_refresh())),
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.recompute_displayed();

        if let Some(selected) = self.selected
            && !self.displayed.contains(&selected)
        {
            self.selected = None;
            self.view.update_details(None);
        }

        self.render_list();
    }

    /// Select the package at `position` in the displayed list, or clear the
    /// selection with `None`.
    pub fn select_package(&mut self, position: Option<usize>) -> Result<(), Error> {
        let Some(position) = position else {
            self.selected = None;
            self.view.update_details(None);
            return Ok(());
        };

        let index = *self
            .displayed
            .get(position)
            .ok_or(Error::InvalidSelection {
                position,
                len: self.displayed.len(),
            })?;

        self.selected = Some(index);
        self.view.update_details(self.catalog.get(index));
        Ok(())
    }

    /// Start a refresh: show the loading placeholder and hand out a ticket
    /// that supersedes every earlier one.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        self.loading = true;
        if self.selected.take().is_some() {
            self.view.update_details(None);
        }
        self.recompute_displayed();
        self.render_list();

        tracing::debug!(generation = self.generation, "refresh started");
        RefreshTicket {
            generation: self.generation,
        }
    }

    /// Install the catalog fetched for `ticket`.
    ///
    /// Returns `false` and leaves state untouched when a newer refresh has
    /// started since the ticket was issued.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, catalog: PackageCatalog) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded refresh"
            );
            return false;
        }

        self.catalog = catalog;
        self.loading = false;
        self.selected = None;
        self.view.update_details(None);
        self.recompute_displayed();
        self.render_list();

        let now = Local::now();
        self.last_updated = Some(now);
        self.view.set_last_update_time(now);
        true
    }

    /// Refresh in place by awaiting the aggregator.
    pub async fn refresh<T: Transport>(&mut self, aggregator: &Aggregator<T>) -> bool {
        let ticket = self.begin_refresh();
        let catalog = aggregator.fetch_all().await;
        self.complete_refresh(ticket, catalog)
    }

    fn recompute_displayed(&mut self) {
        if self.loading {
            self.displayed.clear();
            return;
        }
        let tab = self.current_tab;
        self.displayed = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(_, package)| tab.includes(package))
            .map(|(index, _)| index)
            .collect();
    }

    fn render_list(&mut self) {
        if self.loading {
            self.view.show_empty_message(LOADING_MESSAGE);
            return;
        }

        let packages: Vec<&UnifiedPackage> = self
            .displayed
            .iter()
            .filter_map(|&index| self.catalog.get(index))
            .collect();
        if packages.is_empty() {
            self.view.show_empty_message(EMPTY_MESSAGE);
        } else {
            self.view.display_packages(&packages);
        }
    }
}
