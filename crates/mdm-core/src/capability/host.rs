//! Probe for the machine we run on.

use std::fs;
use std::io;
use std::path::Path;

use super::CapabilityProbe;

const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Reads capabilities from the running host.
///
/// OS version is the major number of `VERSION_ID` in `/etc/os-release`
/// (`12` on Debian 12). RAM comes from `MemTotal` in `/proc/meminfo`, free
/// space from `statvfs(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProbe;

impl CapabilityProbe for HostProbe {
    fn os_version(&self) -> io::Result<i64> {
        let os_release = fs::read_to_string(OS_RELEASE_PATH)?;
        parse_version_id_major(&os_release)
            .ok_or_else(|| invalid_data(format!("no numeric VERSION_ID in {}", OS_RELEASE_PATH)))
    }

    fn total_ram_mb(&self) -> io::Result<u64> {
        let meminfo = fs::read_to_string("/proc/meminfo")?;
        parse_mem_total_kb(&meminfo)
            .map(|kb| kb / 1024)
            .ok_or_else(|| invalid_data("MemTotal missing from /proc/meminfo".to_string()))
    }

    fn free_disk_bytes(&self, path: &Path) -> io::Result<u64> {
        available_bytes(path)
    }
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// `VERSION_ID="12"` → 12, `VERSION_ID=22.04` → 22.
fn parse_version_id_major(os_release: &str) -> Option<i64> {
    let value = os_release
        .lines()
        .find_map(|line| line.trim().strip_prefix("VERSION_ID="))?;
    let digits: String = value
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// `MemTotal:       16314252 kB` → 16314252.
fn parse_mem_total_kb(meminfo: &str) -> Option<u64> {
    meminfo.lines().find_map(|line| {
        let rest = line.strip_prefix("MemTotal:")?;
        rest.split_whitespace().next()?.parse().ok()
    })
}

#[cfg(unix)]
fn available_bytes(path: &Path) -> io::Result<u64> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    // SAFETY: statvfs only writes into the zeroed struct we own.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let r = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if r != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok((stat.f_bavail as u64).saturating_mul(stat.f_frsize as u64))
}

#[cfg(not(unix))]
fn available_bytes(_path: &Path) -> io::Result<u64> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "free disk probe not supported on this platform",
    ))
}
