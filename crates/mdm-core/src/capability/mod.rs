//! Host capability probes used by the selection gates.
//!
//! Each query may fail independently; a failed query leaves the matching gate
//! open.

mod host;

pub use host::HostProbe;

use std::io;
use std::path::Path;

/// Source of host capabilities.
pub trait CapabilityProbe: Send + Sync {
    /// Major OS version number.
    fn os_version(&self) -> io::Result<i64>;
    /// Total physical memory in MB.
    fn total_ram_mb(&self) -> io::Result<u64>;
    /// Bytes available to unprivileged users on the filesystem holding `path`.
    fn free_disk_bytes(&self, path: &Path) -> io::Result<u64>;
}

/// Host values at selection time; `None` when the probe was unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySnapshot {
    pub os_version: Option<i64>,
    pub total_ram_mb: Option<u64>,
    pub free_disk_bytes: Option<u64>,
}

impl CapabilitySnapshot {
    /// No host information: every gate passes.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Queries `probe` now. Failed queries are logged and left as `None`.
    pub fn probe(probe: &dyn CapabilityProbe, disk_path: &Path) -> Self {
        let os_version = probe
            .os_version()
            .map_err(|e| tracing::debug!("os version probe failed: {}", e))
            .ok();
        let total_ram_mb = probe
            .total_ram_mb()
            .map_err(|e| tracing::debug!("ram probe failed: {}", e))
            .ok();
        let free_disk_bytes = probe
            .free_disk_bytes(disk_path)
            .map_err(|e| tracing::debug!(path = %disk_path.display(), "disk probe failed: {}", e))
            .ok();
        let snapshot = Self {
            os_version,
            total_ram_mb,
            free_disk_bytes,
        };
        tracing::debug!(?snapshot, "probed host capabilities");
        snapshot
    }
}

/// Probe returning fixed values; `None` makes the query fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticProbe {
    pub os_version: Option<i64>,
    pub total_ram_mb: Option<u64>,
    pub free_disk_bytes: Option<u64>,
}

fn unavailable(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, format!("{} unavailable", what))
}

impl CapabilityProbe for StaticProbe {
    fn os_version(&self) -> io::Result<i64> {
        self.os_version.ok_or_else(|| unavailable("os version"))
    }

    fn total_ram_mb(&self) -> io::Result<u64> {
        self.total_ram_mb.ok_or_else(|| unavailable("total ram"))
    }

    fn free_disk_bytes(&self, _path: &Path) -> io::Result<u64> {
        self.free_disk_bytes.ok_or_else(|| unavailable("free disk"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_queries_fail_open() {
        let probe = StaticProbe {
            os_version: Some(10),
            total_ram_mb: None,
            free_disk_bytes: Some(1 << 30),
        };
        let snap = CapabilitySnapshot::probe(&probe, Path::new("/"));
        assert_eq!(snap.os_version, Some(10));
        assert_eq!(snap.total_ram_mb, None);
        assert_eq!(snap.free_disk_bytes, Some(1 << 30));
    }

    #[test]
    fn unrestricted_has_no_values() {
        assert_eq!(
            CapabilitySnapshot::probe(&StaticProbe::default(), Path::new("/")),
            CapabilitySnapshot::unrestricted()
        );
    }
}
