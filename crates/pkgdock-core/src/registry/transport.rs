//! HTTP transport used by the registry client

use std::future::Future;

use anyhow::Context;
use url::Url;

const USER_AGENT: &str = concat!("pkgdock/", env!("CARGO_PKG_VERSION"));

/// Issues a single GET and returns the response body.
///
/// Implementations must resolve with an error for non-success statuses. The
/// registry client makes exactly one attempt per fetch.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> impl Future<Output = anyhow::Result<String>> + Send;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {} from {}", response.status(), url);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}
