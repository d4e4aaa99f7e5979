//! Byte-level progress of one streaming download.

/// Snapshot of a running download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Body bytes written to disk so far.
    pub bytes_read: u64,
    /// `Content-Length` of the response, if the server sent one.
    pub total_bytes: Option<u64>,
}

impl DownloadProgress {
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            bytes_read: 0,
            total_bytes,
        }
    }

    pub(crate) fn advance(&mut self, bytes: usize) {
        self.bytes_read = self.bytes_read.saturating_add(bytes as u64);
    }

    /// `floor(bytes_read * 100 / total_bytes)`, clamped to 100.
    /// `None` while the total is unknown (or zero).
    pub fn percent(&self) -> Option<u8> {
        let total = self.total_bytes.filter(|t| *t > 0)?;
        let pct = (u128::from(self.bytes_read) * 100) / u128::from(total);
        Some(pct.min(100) as u8)
    }
}
