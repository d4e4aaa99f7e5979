//! Blocking HTTP GET transport.
//!
//! Every network call in the crate goes through [`HttpTransport`]: one attempt,
//! no retry, no timeout. Implementations block the calling thread; async code
//! runs them under `tokio::task::spawn_blocking`.

mod libcurl;
mod error;
mod parse;

pub use libcurl::CurlTransport;
pub use error::TransportError;
pub use parse::ResponseHead;

/// Receives a response body as it arrives.
pub trait BodySink {
    /// Called once, when the response headers of a 2xx response are complete
    /// and before any body bytes. Also called for an empty body.
    fn begin(&mut self, head: &ResponseHead) -> std::io::Result<()>;

    /// Called for each piece of body data, in order.
    fn write_chunk(&mut self, data: &[u8]) -> std::io::Result<()>;
}

/// Single-attempt HTTP GET.
pub trait HttpTransport: Send + Sync {
    /// GETs `url` and streams the body into `sink`.
    ///
    /// Non-2xx responses fail with [`TransportError::Http`] and never reach the
    /// sink. A sink error aborts the transfer as [`TransportError::Sink`].
    fn get_streaming(&self, url: &str, sink: &mut dyn BodySink) -> Result<(), TransportError>;

    /// GETs `url` and returns the whole body.
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let mut buffer = BufferSink::default();
        self.get_streaming(url, &mut buffer)?;
        Ok(buffer.into_inner())
    }
}

/// Sink that keeps the body in memory.
#[derive(Debug, Default)]
pub struct BufferSink {
    body: Vec<u8>,
}

impl BufferSink {
    pub fn into_inner(self) -> Vec<u8> {
        self.body
    }
}

impl BodySink for BufferSink {
    fn begin(&mut self, head: &ResponseHead) -> std::io::Result<()> {
        if let Some(len) = head.content_length {
            self.body.reserve(usize::try_from(len).unwrap_or(0));
        }
        Ok(())
    }

    fn write_chunk(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.body.extend_from_slice(data);
        Ok(())
    }
}
