//! Local cache for small assets (preview images).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::downloader::file_exists;
use crate::error::SessionError;
use crate::transport::HttpTransport;
use crate::url_model;

/// Downloads an asset once and serves the local copy afterwards.
///
/// Presence of the file is the only check: a truncated file from an earlier
/// failed write is returned as if it were complete.
#[derive(Clone)]
pub struct AssetCache {
    transport: Arc<dyn HttpTransport>,
}

impl AssetCache {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Returns the local path of `url` under `dir`, fetching it first if absent.
    pub async fn ensure_local(&self, url: &str, dir: &Path) -> Result<PathBuf, SessionError> {
        let path = url_model::local_path(dir, url);
        if file_exists(&path).await? {
            tracing::debug!(path = %path.display(), "asset already cached");
            return Ok(path);
        }

        let body = tokio::task::spawn_blocking({
            let transport = Arc::clone(&self.transport);
            let url = url.to_string();
            move || transport.get(&url)
        })
        .await??;

        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, &body).await?;
        tracing::info!(url, path = %path.display(), bytes = body.len(), "cached asset");
        Ok(path)
    }
}
