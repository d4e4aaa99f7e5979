//! Single-stream file downloader with progress reporting.
//!
//! One GET per call, body streamed to `dir/<last URL segment>` in
//! [`CHUNK_SIZE`] pieces. An existing target short-circuits the whole call.
//! A failed transfer leaves its partial file behind, and the next call will
//! treat that file as already downloaded.

mod progress;
mod sink;

pub use progress::DownloadProgress;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::SessionError;
use crate::transport::HttpTransport;
use crate::url_model;
use sink::FileSink;

/// Bytes written (and reported) per step.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// True if `path` is an existing regular file. Directories and other
/// non-file entries do not count.
pub(crate) async fn file_exists(path: &Path) -> std::io::Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Download lifecycle, used in log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    Requesting,
    Streaming,
    Completed,
    Failed,
}

impl fmt::Display for DownloadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DownloadPhase::Idle => "idle",
            DownloadPhase::Requesting => "requesting",
            DownloadPhase::Streaming => "streaming",
            DownloadPhase::Completed => "completed",
            DownloadPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Emitted to the caller while a download runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// The request is about to be sent; no file existed at `path`.
    Started { path: PathBuf },
    /// Sent after every chunk written to disk.
    Progress(DownloadProgress),
}

/// How a download call ended successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The body was streamed to this path.
    Completed(PathBuf),
    /// The target already existed; nothing was requested.
    AlreadyPresent(PathBuf),
}

impl DownloadOutcome {
    pub fn path(&self) -> &Path {
        match self {
            DownloadOutcome::Completed(p) | DownloadOutcome::AlreadyPresent(p) => p,
        }
    }
}

#[derive(Clone)]
pub struct FileDownloader {
    transport: Arc<dyn HttpTransport>,
}

impl FileDownloader {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Downloads `url` into `dir`, calling `on_event` with [`DownloadEvent::Started`]
    /// once the request is committed and with progress after each chunk.
    ///
    /// Returns [`DownloadOutcome::AlreadyPresent`] without any event or request
    /// when the target file exists. The transfer itself runs on the blocking pool,
    /// so `on_event` is called from that thread.
    pub async fn download<F>(
        &self,
        url: &str,
        dir: &Path,
        mut on_event: F,
    ) -> Result<DownloadOutcome, SessionError>
    where
        F: FnMut(DownloadEvent) + Send + 'static,
    {
        let path = url_model::local_path(dir, url);
        if file_exists(&path).await? {
            tracing::info!(path = %path.display(), phase = %DownloadPhase::Idle, "already downloaded");
            return Ok(DownloadOutcome::AlreadyPresent(path));
        }
        tokio::fs::create_dir_all(dir).await?;

        on_event(DownloadEvent::Started { path: path.clone() });
        tracing::info!(url, path = %path.display(), phase = %DownloadPhase::Requesting, "download state");

        let result = tokio::task::spawn_blocking({
            let transport = Arc::clone(&self.transport);
            let url = url.to_string();
            let path = path.clone();
            move || -> Result<u64, SessionError> {
                let mut sink = FileSink::new(path, on_event);
                transport.get_streaming(&url, &mut sink)?;
                Ok(sink.finish()?)
            }
        })
        .await?;

        match result {
            Ok(bytes) => {
                tracing::info!(path = %path.display(), bytes, phase = %DownloadPhase::Completed, "download state");
                Ok(DownloadOutcome::Completed(path))
            }
            Err(e) => {
                tracing::warn!(url, path = %path.display(), phase = %DownloadPhase::Failed, "download failed: {}", e);
                Err(e)
            }
        }
    }
}
