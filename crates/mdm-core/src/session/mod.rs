//! Session orchestration: catalog → selection → preview image, then an
//! on-demand file download.
//!
//! [`SessionBuilder::spawn`] starts the catalog work as a background task and
//! returns right away. Failures never escape the session: each one is logged
//! and published to observers as a [`UserMessage::Error`], or as
//! [`UserMessage::NoEligibleCandidate`] when nothing in the catalog qualifies.

mod state;

pub use state::{DownloadState, StateChange, StateField, StateObserver, UserMessage};

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;

use crate::asset_cache::AssetCache;
use crate::capability::{CapabilityProbe, CapabilitySnapshot, HostProbe};
use crate::catalog::{Candidate, CatalogFetcher, CATALOG_URL};
use crate::config::MdmConfig;
use crate::downloader::{DownloadEvent, DownloadOutcome, FileDownloader};
use crate::error::SessionError;
use crate::select::select;
use crate::transport::HttpTransport;
use state::SharedState;

/// Configures and launches a [`Session`].
pub struct SessionBuilder {
    transport: Arc<dyn HttpTransport>,
    catalog_url: String,
    probe: Option<Arc<dyn CapabilityProbe>>,
    download_dir: PathBuf,
    disk_probe_path: Option<PathBuf>,
    observers: Vec<Arc<dyn StateObserver>>,
}

impl SessionBuilder {
    /// Defaults: fixed catalog URL, host probe, platform temp dir.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            catalog_url: CATALOG_URL.to_string(),
            probe: Some(Arc::new(HostProbe)),
            download_dir: std::env::temp_dir(),
            disk_probe_path: None,
            observers: Vec::new(),
        }
    }

    pub fn from_config(transport: Arc<dyn HttpTransport>, cfg: &MdmConfig) -> Self {
        let mut builder = Self::new(transport)
            .download_dir(cfg.resolved_download_dir())
            .disk_probe_path(cfg.resolved_disk_probe_path());
        if !cfg.capability_gates {
            builder = builder.without_capability_gates();
        }
        builder
    }

    pub fn catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    pub fn probe(mut self, probe: Arc<dyn CapabilityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Select without os/ram/disk gates.
    pub fn without_capability_gates(mut self) -> Self {
        self.probe = None;
        self
    }

    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Filesystem probed for free space (defaults to the download dir).
    pub fn disk_probe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.disk_probe_path = Some(path.into());
        self
    }

    /// Registers an observer before any state change can happen.
    pub fn observer(mut self, observer: Arc<dyn StateObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Creates the session and spawns its startup task (catalog, selection,
    /// image). Must be called inside a tokio runtime. The handle only needs
    /// to be awaited by callers that want to wait for startup.
    pub fn spawn(self) -> (Arc<Session>, JoinHandle<()>) {
        let state = Arc::new(SharedState::default());
        for observer in self.observers {
            state.subscribe(observer);
        }
        let disk_probe_path = self
            .disk_probe_path
            .unwrap_or_else(|| self.download_dir.clone());
        let session = Arc::new(Session {
            state,
            fetcher: CatalogFetcher::with_url(Arc::clone(&self.transport), self.catalog_url),
            assets: AssetCache::new(Arc::clone(&self.transport)),
            downloader: FileDownloader::new(self.transport),
            probe: self.probe,
            download_dir: self.download_dir,
            disk_probe_path,
            candidate: Mutex::new(None),
        });
        let startup = tokio::spawn(Arc::clone(&session).startup());
        (session, startup)
    }
}

/// One catalog selection and its download.
pub struct Session {
    state: Arc<SharedState>,
    fetcher: CatalogFetcher,
    assets: AssetCache,
    downloader: FileDownloader,
    probe: Option<Arc<dyn CapabilityProbe>>,
    download_dir: PathBuf,
    disk_probe_path: PathBuf,
    candidate: Mutex<Option<Candidate>>,
}

impl Session {
    pub fn snapshot(&self) -> DownloadState {
        self.state.snapshot()
    }

    pub fn subscribe(&self, observer: Arc<dyn StateObserver>) {
        self.state.subscribe(observer);
    }

    /// The selected candidate, once startup got that far.
    pub fn candidate(&self) -> Option<Candidate> {
        self.candidate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    async fn startup(self: Arc<Self>) {
        let candidate = match self.load_candidate().await {
            Ok(c) => c,
            Err(SessionError::NotFound) => {
                self.state.no_candidate();
                return;
            }
            Err(e) => {
                self.state.error(format!("Failed to fetch catalog: {}", e));
                return;
            }
        };

        match self
            .assets
            .ensure_local(&candidate.image_url, &self.download_dir)
            .await
        {
            Ok(path) => self.state.apply(StateChange::ImagePath(path)),
            Err(e) => self.state.error(format!("Failed to download image: {}", e)),
        }
    }

    async fn load_candidate(&self) -> Result<Candidate, SessionError> {
        let records = self.fetcher.fetch().await?;
        let host = match &self.probe {
            Some(probe) => CapabilitySnapshot::probe(probe.as_ref(), &self.disk_probe_path),
            None => CapabilitySnapshot::unrestricted(),
        };
        let record = select(&records, &host).ok_or(SessionError::NotFound)?;
        let candidate = Candidate::from_record(record)?;
        tracing::info!(
            title = %candidate.title,
            file_url = %candidate.file_url,
            "selected candidate"
        );

        self.state.apply(StateChange::Title(candidate.title.clone()));
        *self.candidate.lock().unwrap_or_else(PoisonError::into_inner) = Some(candidate.clone());
        Ok(candidate)
    }

    /// Downloads the selected file into the session directory.
    ///
    /// Refuses to start while `is_downloading` is set. The flag is checked
    /// here and set only once the request is committed, so two calls racing
    /// through that window can both proceed.
    pub async fn start_download(&self) -> Result<DownloadOutcome, SessionError> {
        let result = self.run_download().await;
        match &result {
            Ok(DownloadOutcome::AlreadyPresent(path)) => {
                self.state
                    .info(format!("File already downloaded: {}", path.display()));
            }
            Ok(DownloadOutcome::Completed(path)) => {
                self.state
                    .info(format!("Download complete! Saved at: {}", path.display()));
            }
            Err(e) => self.state.error(format!("Download failed: {}", e)),
        }
        result
    }

    async fn run_download(&self) -> Result<DownloadOutcome, SessionError> {
        let url = self
            .candidate()
            .map(|c| c.file_url)
            .filter(|u| !u.is_empty())
            .ok_or(SessionError::NoSelection)?;
        if self.state.snapshot().is_downloading {
            return Err(SessionError::Busy);
        }

        let state = Arc::clone(&self.state);
        let outcome = self
            .downloader
            .download(&url, &self.download_dir, move |event| match event {
                DownloadEvent::Started { .. } => {
                    state.apply(StateChange::Progress(0));
                    state.apply(StateChange::Downloading(true));
                }
                DownloadEvent::Progress(progress) => {
                    if let Some(pct) = progress.percent() {
                        state.apply(StateChange::Progress(pct));
                    }
                }
            })
            .await;

        self.state.apply(StateChange::Downloading(false));
        outcome
    }
}
