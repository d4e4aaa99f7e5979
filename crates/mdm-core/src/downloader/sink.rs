//! Body sink writing straight to the destination file.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use super::{DownloadEvent, DownloadPhase, DownloadProgress, CHUNK_SIZE};
use crate::transport::{BodySink, ResponseHead};

/// Creates the destination on the first 2xx header block, then writes every
/// 8 KiB piece as it comes in and reports progress after each one.
pub(super) struct FileSink<F> {
    path: PathBuf,
    file: Option<File>,
    progress: DownloadProgress,
    on_event: F,
}

impl<F> FileSink<F>
where
    F: FnMut(DownloadEvent),
{
    pub(super) fn new(path: PathBuf, on_event: F) -> Self {
        Self {
            path,
            file: None,
            progress: DownloadProgress::default(),
            on_event,
        }
    }

    /// Flushes and closes the file. Returns the number of body bytes written.
    pub(super) fn finish(mut self) -> io::Result<u64> {
        let file = match self.file.take() {
            Some(f) => f,
            None => File::create(&self.path)?,
        };
        file.sync_all()?;
        Ok(self.progress.bytes_read)
    }
}

impl<F> BodySink for FileSink<F>
where
    F: FnMut(DownloadEvent),
{
    fn begin(&mut self, head: &ResponseHead) -> io::Result<()> {
        self.file = Some(File::create(&self.path)?);
        self.progress = DownloadProgress::new(head.content_length);
        tracing::debug!(
            path = %self.path.display(),
            total = ?head.content_length,
            phase = %DownloadPhase::Streaming,
            "download state"
        );
        Ok(())
    }

    fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::other("body data before response headers"))?;
        for piece in data.chunks(CHUNK_SIZE) {
            file.write_all(piece)?;
            self.progress.advance(piece.len());
            (self.on_event)(DownloadEvent::Progress(self.progress));
        }
        Ok(())
    }
}
