//! View contract for package browser frontends.
//!
//! A view only renders what the presenter hands it and reports user intent
//! back as [`ViewEvent`]s. It never owns or mutates catalog data.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};

use crate::catalog::{PackageSource, UnifiedPackage};

pub const LOADING_MESSAGE: &str = "Fetching packages...";
pub const EMPTY_MESSAGE: &str = "No packages found!!!";

/// Filter selector over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    All,
    Unity,
    Verdaccio,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::All, Tab::Unity, Tab::Verdaccio];

    pub fn id(self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Unity => "unity",
            Tab::Verdaccio => "verdaccio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "All Packages",
            Tab::Unity => PackageSource::Unity.label(),
            Tab::Verdaccio => PackageSource::Verdaccio.label(),
        }
    }

    /// Whether a package belongs in this tab.
    pub fn includes(self, package: &UnifiedPackage) -> bool {
        match self {
            Tab::All => true,
            Tab::Unity => package.source() == PackageSource::Unity,
            Tab::Verdaccio => package.source() == PackageSource::Verdaccio,
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::All => Tab::Unity,
            Tab::Unity => Tab::Verdaccio,
            Tab::Verdaccio => Tab::All,
        }
    }

    pub fn previous(self) -> Tab {
        match self {
            Tab::All => Tab::Verdaccio,
            Tab::Unity => Tab::All,
            Tab::Verdaccio => Tab::Unity,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Tab::All),
            "unity" => Ok(Tab::Unity),
            "verdaccio" => Ok(Tab::Verdaccio),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

/// User intent reported by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Position in the displayed list, or `None` when the selection was cleared.
    PackageSelected(Option<usize>),
    TabSelected(Tab),
    RefreshClicked,
}

/// Rendering surface driven by the presenter.
pub trait PackageView {
    fn display_packages(&mut self, packages: &[&UnifiedPackage]);

    /// Replace the list with a message (loading or empty state).
    fn show_empty_message(&mut self, message: &str);

    /// Render details for the package, or hide the details pane on `None`.
    fn update_details(&mut self, package: Option<&UnifiedPackage>);

    fn set_last_update_time(&mut self, time: DateTime<Local>);
}

/// Second line of the details pane: `"{name} | {version}"`.
pub fn details_subtitle(package: &UnifiedPackage) -> String {
    format!("{} | {}", package.name(), package.version())
}

pub fn format_last_update(time: DateTime<Local>) -> String {
    format!("Last update {}", time.format("%b %d, %H:%M"))
}
