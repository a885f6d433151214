//! Registry client for the Unity and Verdaccio endpoints

use serde_json::Value;
use url::Url;

use crate::catalog::PackageSource;
use crate::error::Error;

use super::schema::{UnityPackageRegistry, VerdaccioPackageRecord, VerdaccioRegistry};
use super::transport::{HttpTransport, Transport};

/// Fetches package listings through an injected transport.
#[derive(Debug, Clone)]
pub struct RegistryClient<T = HttpTransport> {
    transport: T,
}

impl RegistryClient<HttpTransport> {
    /// Client using the default reqwest transport.
    pub fn http() -> anyhow::Result<Self> {
        Ok(Self::new(HttpTransport::new()?))
    }
}

impl<T: Transport> RegistryClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the Unity package registry.
    ///
    /// The endpoint returns a bare array; it is wrapped under `packages`
    /// before deserializing into the registry envelope.
    pub async fn fetch_unity_packages(&self, url: &Url) -> Result<UnityPackageRegistry, Error> {
        let body = self.get(PackageSource::Unity, url).await?;
        let array: Value = parse(PackageSource::Unity, url, &body)?;
        let enveloped = serde_json::json!({ "packages": array });
        let registry: UnityPackageRegistry =
            serde_json::from_value(enveloped).map_err(|source| Error::Parse {
                registry: PackageSource::Unity,
                url: url.clone(),
                source,
            })?;

        tracing::debug!(
            url = %url,
            count = registry.packages.len(),
            "fetched Unity package registry"
        );
        Ok(registry)
    }

    /// Fetch Verdaccio search results.
    pub async fn fetch_verdaccio_packages(&self, url: &Url) -> Result<VerdaccioRegistry, Error> {
        let body = self.get(PackageSource::Verdaccio, url).await?;
        let packages: Vec<VerdaccioPackageRecord> = parse(PackageSource::Verdaccio, url, &body)?;

        tracing::debug!(url = %url, count = packages.len(), "fetched Verdaccio packages");
        Ok(VerdaccioRegistry { packages })
    }

    async fn get(&self, registry: PackageSource, url: &Url) -> Result<String, Error> {
        self.transport
            .get(url)
            .await
            .map_err(|err| Error::Network {
                registry,
                url: url.clone(),
                reason: format!("{err:#}"),
            })
    }
}

fn parse<D: serde::de::DeserializeOwned>(
    registry: PackageSource,
    url: &Url,
    body: &str,
) -> Result<D, Error> {
    serde_json::from_str(body).map_err(|source| Error::Parse {
        registry,
        url: url.clone(),
        source,
    })
}
