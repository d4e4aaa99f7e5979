use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/mdm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MdmConfig {
    /// Directory for cached images and downloaded files (None = platform temp dir).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Path whose filesystem is probed for free space (None = the download dir).
    #[serde(default)]
    pub disk_probe_path: Option<PathBuf>,
    /// Apply the os/ram/disk capability gates when selecting a candidate.
    #[serde(default = "default_capability_gates")]
    pub capability_gates: bool,
}

fn default_capability_gates() -> bool {
    true
}

impl Default for MdmConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            disk_probe_path: None,
            capability_gates: default_capability_gates(),
        }
    }
}

impl MdmConfig {
    /// Scratch directory for images and files.
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Path handed to the free-disk probe.
    pub fn resolved_disk_probe_path(&self) -> PathBuf {
        self.disk_probe_path
            .clone()
            .unwrap_or_else(|| self.resolved_download_dir())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mdm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MdmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MdmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MdmConfig = toml::from_str(&data)?;
    Ok(cfg)
}
