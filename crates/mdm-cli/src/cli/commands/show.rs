//! `mdm show` – select the best catalog entry.

use anyhow::Result;
use mdm_core::config::MdmConfig;

use super::start_session;

pub async fn run_show(cfg: &MdmConfig) -> Result<()> {
    let session = start_session(cfg).await?;
    match session.candidate() {
        Some(candidate) => {
            println!("File: {}", candidate.file_url);
            Ok(())
        }
        None => anyhow::bail!("no candidate selected"),
    }
}
