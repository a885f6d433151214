//! Aggregation of both registries into one catalog

use crate::config::RegistryUrls;
use crate::error::Error;
use crate::registry::{HttpTransport, RegistryClient, Transport};

use super::PackageCatalog;

/// Outcome of one aggregation cycle.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub catalog: PackageCatalog,
    /// Per-source errors; a failed source contributed no records.
    pub failures: Vec<Error>,
    /// `false` when the URLs were not configured and nothing was fetched.
    pub attempted: bool,
}

/// Joins the Unity and Verdaccio fetches into a [`PackageCatalog`].
#[derive(Debug, Clone)]
pub struct Aggregator<T = HttpTransport> {
    client: RegistryClient<T>,
    urls: RegistryUrls,
}

impl<T: Transport> Aggregator<T> {
    pub fn new(client: RegistryClient<T>, urls: RegistryUrls) -> Self {
        Self { client, urls }
    }

    pub fn client(&self) -> &RegistryClient<T> {
        &self.client
    }

    /// Fetch both registries and build the catalog.
    ///
    /// Resolves once both requests have settled. A failed source is logged and
    /// contributes nothing; this never returns an error.
    pub async fn fetch_all(&self) -> PackageCatalog {
        self.fetch_all_with_report().await.catalog
    }

    pub async fn fetch_all_with_report(&self) -> FetchReport {
        let Some((unity_url, verdaccio_url)) = self.urls.configured() else {
            tracing::warn!(
                unity = ?self.urls.unity_registry_url,
                verdaccio = ?self.urls.verdaccio_search_url,
                "registry URLs are not configured; check pkgdock.json"
            );
            return FetchReport::default();
        };

        let (unity, verdaccio) = tokio::join!(
            self.client.fetch_unity_packages(&unity_url),
            self.client.fetch_verdaccio_packages(&verdaccio_url),
        );

        let mut failures = Vec::new();
        let unity = unity.unwrap_or_else(|err| {
            tracing::warn!("{}", err.report());
            failures.push(err);
            Default::default()
        });
        let verdaccio = verdaccio.unwrap_or_else(|err| {
            tracing::warn!("{}", err.report());
            failures.push(err);
            Default::default()
        });

        let catalog = PackageCatalog::from_records(unity.packages, verdaccio.packages);
        tracing::debug!(
            packages = catalog.len(),
            failed_sources = failures.len(),
            "aggregated package catalog"
        );

        FetchReport {
            catalog,
            failures,
            attempted: true,
        }
    }
}
