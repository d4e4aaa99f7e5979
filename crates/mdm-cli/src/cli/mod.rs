//! CLI for the MDM mini download manager.

mod commands;
mod console;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mdm_core::config::{self, MdmConfig};
use std::path::PathBuf;

use commands::{run_download, run_probe, run_show};

/// Top-level CLI for the MDM download manager.
#[derive(Debug, Parser)]
#[command(name = "mdm")]
#[command(about = "MDM: fetch the best download from the catalog", long_about = None)]
pub struct Cli {
    /// Directory for cached images and downloaded files (overrides config).
    #[arg(long, global = true, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Ignore the os/ram/disk requirements of catalog entries.
    #[arg(long, global = true)]
    pub no_gates: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Select the best catalog entry and cache its preview image.
    Show,

    /// Select the best catalog entry and download its file.
    Download,

    /// Print the host capabilities used by the selection gates.
    Probe,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    pub fn effective_config(&self, mut cfg: MdmConfig) -> MdmConfig {
        if let Some(dir) = &self.download_dir {
            cfg.download_dir = Some(dir.clone());
        }
        if self.no_gates {
            cfg.capability_gates = false;
        }
        cfg
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.effective_config(config::load_or_init()?);
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Show => run_show(&cfg).await?,
            CliCommand::Download => run_download(&cfg).await?,
            CliCommand::Probe => run_probe(&cfg),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
