//! Error kinds surfaced by the core.
//!
//! None of these are fatal: config errors fall back to defaults, per-source
//! fetch errors contribute an empty set to the catalog.

use std::path::PathBuf;

use url::Url;

use crate::catalog::PackageSource;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("registry config at {path} is missing or invalid: {reason}")]
    ConfigMissingOrInvalid { path: PathBuf, reason: String },

    #[error("failed to write registry config to {path}")]
    ConfigWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{registry} registry request to {url} failed: {reason}")]
    Network {
        registry: PackageSource,
        url: Url,
        reason: String,
    },

    #[error("{registry} registry response from {url} could not be parsed")]
    Parse {
        registry: PackageSource,
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    #[error("package position {position} is outside the displayed list of {len}")]
    InvalidSelection { position: usize, len: usize },
}

impl Error {
    /// Registry the error originated from, if it was a fetch error.
    pub fn registry(&self) -> Option<PackageSource> {
        match self {
            Error::Network { registry, .. } | Error::Parse { registry, .. } => Some(*registry),
            _ => None,
        }
    }

    /// Message including the chain of underlying causes.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
