//! CLI command handlers, one per file.

mod download;
mod probe;
mod show;

pub use download::run_download;
pub use probe::run_probe;
pub use show::run_show;

use anyhow::{Context, Result};
use mdm_core::config::MdmConfig;
use mdm_core::session::{Session, SessionBuilder};
use mdm_core::transport::CurlTransport;
use std::sync::Arc;

use crate::cli::console::ConsoleObserver;

/// Spawns a session and waits for its startup (catalog, selection, image).
async fn start_session(cfg: &MdmConfig) -> Result<Arc<Session>> {
    let (session, startup) = SessionBuilder::from_config(Arc::new(CurlTransport::new()), cfg)
        .observer(Arc::new(ConsoleObserver))
        .spawn();
    startup.await.context("session startup task")?;
    Ok(session)
}
