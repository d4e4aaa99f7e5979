//! Candidate filtering and ranking.

use std::cmp::Reverse;

use crate::capability::CapabilitySnapshot;
use crate::catalog::{CatalogRecord, CatalogValue, KEY_DISK, KEY_OS, KEY_RAM, KEY_SCORE};

/// Picks the best record for this host, or `None` if nothing passes.
///
/// A record needs a `Score` key. The `os`, `ram` and `disk` fields are minimum
/// requirements checked against `host`; each gate is open when the record
/// field is missing or not a number, or the host value is unknown. Survivors
/// are ranked by integer score (non-numeric scores rank as 0), highest first;
/// on a tie the earlier record wins.
pub fn select<'a>(records: &'a [CatalogRecord], host: &CapabilitySnapshot) -> Option<&'a CatalogRecord> {
    let mut ranked: Vec<(i64, &CatalogRecord)> = records
        .iter()
        .filter(|r| r.contains(KEY_SCORE))
        .filter(|r| gate(r, KEY_OS, host.os_version.map(|v| v as f64)))
        .filter(|r| gate(r, KEY_RAM, host.total_ram_mb.map(|v| v as f64)))
        .filter(|r| gate(r, KEY_DISK, host.free_disk_bytes.map(|v| v as f64)))
        .map(|r| (rank_score(r), r))
        .collect();

    // Stable sort: equal scores keep input order.
    ranked.sort_by_key(|(score, _)| Reverse(*score));
    let best = ranked.first().map(|(_, r)| *r);
    tracing::debug!(
        total = records.len(),
        eligible = ranked.len(),
        found = best.is_some(),
        "candidate selection"
    );
    best
}

/// True if the record's requirement under `key` fits `available`.
fn gate(record: &CatalogRecord, key: &str, available: Option<f64>) -> bool {
    match (record.number(key), available) {
        (Some(required), Some(available)) => required <= available,
        _ => true,
    }
}

fn rank_score(record: &CatalogRecord) -> i64 {
    record
        .get(KEY_SCORE)
        .and_then(CatalogValue::as_i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{parse_catalog, KEY_TITLE};

    fn records(json: &str) -> Vec<CatalogRecord> {
        parse_catalog(json.as_bytes()).unwrap()
    }

    fn title(r: Option<&CatalogRecord>) -> Option<String> {
        r.and_then(|r| r.text(KEY_TITLE))
    }

    fn host(os: i64, ram_mb: u64, disk: u64) -> CapabilitySnapshot {
        CapabilitySnapshot {
            os_version: Some(os),
            total_ram_mb: Some(ram_mb),
            free_disk_bytes: Some(disk),
        }
    }

    #[test]
    fn highest_score_wins() {
        let rs = records(
            r#"[{"Title":"A","FileURL":"http://x/a.bin","ImageURL":"http://x/a.png","Score":5},
                {"Title":"B","FileURL":"http://x/b.bin","ImageURL":"http://x/b.png","Score":9}]"#,
        );
        let picked = select(&rs, &CapabilitySnapshot::unrestricted());
        assert_eq!(title(picked).as_deref(), Some("B"));
        assert!(std::ptr::eq(picked.unwrap(), &rs[1]));
    }

    #[test]
    fn non_numeric_score_ranks_zero() {
        let rs = records(r#"[{"Title":"A","FileURL":"u","ImageURL":"u2","Score":"high"}]"#);
        assert_eq!(title(select(&rs, &CapabilitySnapshot::unrestricted())).as_deref(), Some("A"));

        let rs = records(r#"[{"Title":"A","Score":"high"},{"Title":"B","Score":1}]"#);
        assert_eq!(title(select(&rs, &CapabilitySnapshot::unrestricted())).as_deref(), Some("B"));

        let rs = records(r#"[{"Title":"A","Score":"high"},{"Title":"B","Score":-1}]"#);
        assert_eq!(title(select(&rs, &CapabilitySnapshot::unrestricted())).as_deref(), Some("A"));
    }

    #[test]
    fn missing_score_excluded() {
        let rs = records(r#"[{"Title":"A"},{"Title":"B","Score":null}]"#);
        assert_eq!(title(select(&rs, &CapabilitySnapshot::unrestricted())).as_deref(), Some("B"));

        let rs = records(r#"[{"Title":"A"}]"#);
        assert!(select(&rs, &CapabilitySnapshot::unrestricted()).is_none());
    }

    #[test]
    fn empty_catalog() {
        assert!(select(&[], &CapabilitySnapshot::unrestricted()).is_none());
    }

    #[test]
    fn ties_go_to_first() {
        let rs = records(r#"[{"Title":"A","Score":3},{"Title":"B","Score":7},{"Title":"C","Score":7}]"#);
        assert_eq!(title(select(&rs, &CapabilitySnapshot::unrestricted())).as_deref(), Some("B"));

        let rs = records(r#"[{"Title":"A","Score":"x"},{"Title":"B","Score":0}]"#);
        assert_eq!(title(select(&rs, &CapabilitySnapshot::unrestricted())).as_deref(), Some("A"));
    }

    #[test]
    fn os_gate_is_minimum_version() {
        let rs = records(r#"[{"Title":"New","Score":9,"os":11},{"Title":"Old","Score":1,"os":10}]"#);
        assert_eq!(title(select(&rs, &host(10, 8192, u64::MAX))).as_deref(), Some("Old"));
        assert_eq!(title(select(&rs, &host(11, 8192, u64::MAX))).as_deref(), Some("New"));
    }

    #[test]
    fn ram_and_disk_gates() {
        let rs = records(
            r#"[{"Title":"Big","Score":9,"ram":16384},
                {"Title":"Huge","Score":8,"disk":5000000000},
                {"Title":"Small","Score":1,"ram":2048,"disk":1000}]"#,
        );
        assert_eq!(title(select(&rs, &host(10, 8192, 1_000_000))).as_deref(), Some("Small"));
        assert_eq!(
            title(select(&rs, &host(10, 8192, 10_000_000_000))).as_deref(),
            Some("Huge")
        );
        assert!(select(&rs, &host(10, 1024, 10)).is_none());
    }

    #[test]
    fn gates_fail_open() {
        // Mistyped requirement.
        let rs = records(r#"[{"Title":"A","Score":1,"ram":"16GB","os":"eleven"}]"#);
        assert_eq!(title(select(&rs, &host(1, 1, 0))).as_deref(), Some("A"));

        // Unknown host value.
        let rs = records(r#"[{"Title":"A","Score":1,"ram":999999,"disk":999999,"os":99}]"#);
        assert_eq!(title(select(&rs, &CapabilitySnapshot::unrestricted())).as_deref(), Some("A"));
    }

    #[test]
    fn result_is_from_input() {
        let rs = records(r#"[{"Score":1},{"Score":4},{"Score":2},{"x":1}]"#);
        let picked = select(&rs, &CapabilitySnapshot::unrestricted()).unwrap();
        assert!(rs.iter().any(|r| std::ptr::eq(r, picked)));
        assert!(std::ptr::eq(picked, &rs[1]));
    }
}
