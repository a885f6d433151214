//! pkgdock Core Library
//!
//! Aggregates package listings from a Unity package registry and a Verdaccio
//! server into one sorted catalog, and drives a package browser view with tab
//! filtering and selection.

pub mod catalog;
pub mod config;
pub mod error;
pub mod presenter;
pub mod registry;
pub mod view;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigOrigin, ConfigStore, LoadedConfig, RegistryUrls};

    // Registry
    pub use crate::registry::{HttpTransport, RegistryClient, Transport};

    // Catalog
    pub use crate::catalog::{
        Aggregator, FetchReport, PackageCatalog, PackageSource, UnifiedPackage,
    };

    // Presentation
    pub use crate::presenter::{Presenter, RefreshTicket};
    pub use crate::view::{PackageView, Tab, ViewEvent};

    pub use crate::error::Error;
}
