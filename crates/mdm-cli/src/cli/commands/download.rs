//! `mdm download` – select the best catalog entry and download its file.

use anyhow::{Context, Result};
use mdm_core::config::MdmConfig;

use super::start_session;

pub async fn run_download(cfg: &MdmConfig) -> Result<()> {
    let session = start_session(cfg).await?;
    if session.candidate().is_none() {
        anyhow::bail!("no candidate selected");
    }
    let outcome = session
        .start_download()
        .await
        .context("download failed")?;
    tracing::debug!(path = %outcome.path().display(), "download finished");
    Ok(())
}
