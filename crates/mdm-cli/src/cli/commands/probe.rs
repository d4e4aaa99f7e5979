//! `mdm probe` – show host capabilities.

use mdm_core::capability::{CapabilitySnapshot, HostProbe};
use mdm_core::config::MdmConfig;

fn show<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unavailable".to_string())
}

pub fn run_probe(cfg: &MdmConfig) {
    let disk_path = cfg.resolved_disk_probe_path();
    let snap = CapabilitySnapshot::probe(&HostProbe, &disk_path);
    println!("{:<12} {}", "os", show(snap.os_version));
    println!("{:<12} {}", "ram (MB)", show(snap.total_ram_mb));
    println!(
        "{:<12} {} ({})",
        "disk (B)",
        show(snap.free_disk_bytes),
        disk_path.display()
    );
    if !cfg.capability_gates {
        println!("capability gates are disabled");
    }
}
