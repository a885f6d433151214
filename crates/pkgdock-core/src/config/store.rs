//! Config store for loading and saving pkgdock.json.

use std::path::{Path, PathBuf};

use crate::error::Error;

use super::{RegistryUrls, paths::default_config_path};

/// Where the loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    File,
    /// File was missing; defaults were written to disk.
    Created,
    /// File was missing or unreadable; defaults are used in memory only.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub urls: RegistryUrls,
    pub origin: ConfigOrigin,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at the default location next to the running executable.
    pub fn from_default_location() -> anyhow::Result<Self> {
        Ok(Self::from_path(default_config_path()?))
    }

    pub fn from_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the registry URLs, creating the file with defaults if needed.
    ///
    /// Never fails: unreadable or malformed files fall back to defaults and a
    /// failed write of the default file is only logged.
    pub fn load(&self) -> LoadedConfig {
        if !self.config_path.exists() {
            let urls = RegistryUrls::default();
            let origin = match self.save(&urls) {
                Ok(()) => {
                    tracing::debug!(
                        path = %self.config_path.display(),
                        "created default registry config"
                    );
                    ConfigOrigin::Created
                }
                Err(err) => {
                    tracing::warn!("{}", err.report());
                    ConfigOrigin::Fallback
                }
            };
            return LoadedConfig { urls, origin };
        }

        match self.read() {
            Ok(urls) => LoadedConfig {
                urls,
                origin: ConfigOrigin::File,
            },
            Err(err) => {
                tracing::warn!("{}; falling back to default registry URLs", err.report());
                LoadedConfig {
                    urls: RegistryUrls::default(),
                    origin: ConfigOrigin::Fallback,
                }
            }
        }
    }

    pub fn save(&self, urls: &RegistryUrls) -> Result<(), Error> {
        let write_failed = |source: std::io::Error| Error::ConfigWriteFailed {
            path: self.config_path.clone(),
            source,
        };

        let content = serde_json::to_string_pretty(urls)
            .map_err(|e| write_failed(std::io::Error::other(e)))?;
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
        std::fs::write(&self.config_path, content).map_err(write_failed)?;
        Ok(())
    }

    fn read(&self) -> Result<RegistryUrls, Error> {
        let invalid = |reason: String| Error::ConfigMissingOrInvalid {
            path: self.config_path.clone(),
            reason,
        };

        let content =
            std::fs::read_to_string(&self.config_path).map_err(|e| invalid(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))
    }
}

