//! Catalog retrieval.

use std::sync::Arc;

use super::{parse_catalog, CatalogRecord};
use crate::error::SessionError;
use crate::transport::HttpTransport;

/// Fixed endpoint serving the candidate list.
pub const CATALOG_URL: &str = "https://4qgz7zu7l5um367pzultcpbhmm0thhhg.lambda-url.us-west-2.on.aws/";

/// Fetches and decodes the candidate list with one GET; no retry, no caching.
#[derive(Clone)]
pub struct CatalogFetcher {
    transport: Arc<dyn HttpTransport>,
    url: String,
}

impl CatalogFetcher {
    /// Fetcher for [`CATALOG_URL`].
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_url(transport, CATALOG_URL)
    }

    pub fn with_url(transport: Arc<dyn HttpTransport>, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Vec<CatalogRecord>, SessionError> {
        let body = tokio::task::spawn_blocking({
            let transport = Arc::clone(&self.transport);
            let url = self.url.clone();
            move || transport.get(&url)
        })
        .await??;

        let records = parse_catalog(&body)?;
        tracing::info!(url = %self.url, count = records.len(), "fetched catalog");
        Ok(records)
    }
}
