//! Registry URL configuration schema
//!
//! Mirrors the on-disk `pkgdock.json` layout:
//!
//! ```json
//! {
//!   "UnityPackageRegistryURL": "http://localhost:8080/packages.json",
//!   "VerdaccioSearchURL": "http://localhost:4873/-/verdaccio/data/packages"
//! }
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_UNITY_REGISTRY_URL: &str = "http://localhost:8080/packages.json";
pub const DEFAULT_VERDACCIO_SEARCH_URL: &str = "http://localhost:4873/-/verdaccio/data/packages";

/// The two registry endpoints the catalog is aggregated from.
///
/// Keys missing from the file keep their built-in default; an explicit `null`
/// or empty string leaves that registry unconfigured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryUrls {
    #[serde(rename = "UnityPackageRegistryURL")]
    pub unity_registry_url: Option<String>,

    #[serde(rename = "VerdaccioSearchURL")]
    pub verdaccio_search_url: Option<String>,
}

impl Default for RegistryUrls {
    fn default() -> Self {
        Self {
            unity_registry_url: Some(DEFAULT_UNITY_REGISTRY_URL.to_string()),
            verdaccio_search_url: Some(DEFAULT_VERDACCIO_SEARCH_URL.to_string()),
        }
    }
}

impl RegistryUrls {
    pub fn new(
        unity_registry_url: impl Into<String>,
        verdaccio_search_url: impl Into<String>,
    ) -> Self {
        Self {
            unity_registry_url: Some(unity_registry_url.into()),
            verdaccio_search_url: Some(verdaccio_search_url.into()),
        }
    }

    /// Both endpoints parsed, or `None` if either is absent, blank or not an
    /// absolute URL.
    pub fn configured(&self) -> Option<(Url, Url)> {
        let unity = parse_configured(self.unity_registry_url.as_deref())?;
        let verdaccio = parse_configured(self.verdaccio_search_url.as_deref())?;
        Some((unity, verdaccio))
    }

    pub fn is_configured(&self) -> bool {
        self.configured().is_some()
    }
}

fn parse_configured(value: Option<&str>) -> Option<Url> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    Url::parse(value).ok()
}
