//! Terminal implementation of the package view.
//!
//! Holds only what the presenter last told it to render; `ui` draws from it.

use chrono::{DateTime, Local};
use pkgdock_core::catalog::{PackageSource, UnifiedPackage};
use pkgdock_core::view::{PackageView, details_subtitle, format_last_update};

#[derive(Debug, Clone)]
pub struct PackageRow {
    pub display_name: String,
    pub version: String,
    pub source: PackageSource,
}

#[derive(Debug, Clone)]
pub struct PackageDetails {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub source: PackageSource,
}

#[derive(Debug, Default)]
pub struct TerminalView {
    rows: Vec<PackageRow>,
    /// Replaces the list while set (loading or empty state).
    message: Option<String>,
    details: Option<PackageDetails>,
    last_update: Option<String>,
}

impl TerminalView {
    pub fn rows(&self) -> &[PackageRow] {
        &self.rows
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn details(&self) -> Option<&PackageDetails> {
        self.details.as_ref()
    }

    pub fn last_update(&self) -> Option<&str> {
        self.last_update.as_deref()
    }
}

impl PackageView for TerminalView {
    fn display_packages(&mut self, packages: &[&UnifiedPackage]) {
        self.message = None;
        self.rows = packages
            .iter()
            .map(|p| PackageRow {
                display_name: p.display_name().to_string(),
                version: p.version().to_string(),
                source: p.source(),
            })
            .collect();
    }

    fn show_empty_message(&mut self, message: &str) {
        self.rows.clear();
        self.message = Some(message.to_string());
    }

    fn update_details(&mut self, package: Option<&UnifiedPackage>) {
        self.details = package.map(|p| PackageDetails {
            title: p.display_name().to_string(),
            subtitle: details_subtitle(p),
            description: p.description().to_string(),
            source: p.source(),
        });
    }

    fn set_last_update_time(&mut self, time: DateTime<Local>) {
        self.last_update = Some(format_last_update(time));
    }
}
