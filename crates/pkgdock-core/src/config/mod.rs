//! Registry configuration
//!
//! A small JSON file holding the two registry URLs. It is read once per
//! session; a missing file is created with defaults and an unreadable one is
//! replaced by defaults in memory.

pub mod paths;
pub mod schema;
pub mod store;

pub use paths::{CONFIG_FILE_NAME, default_config_path};
pub use schema::{DEFAULT_UNITY_REGISTRY_URL, DEFAULT_VERDACCIO_SEARCH_URL, RegistryUrls};
pub use store::{ConfigOrigin, ConfigStore, LoadedConfig};
