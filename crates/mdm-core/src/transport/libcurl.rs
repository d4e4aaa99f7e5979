//! libcurl-backed transport.
//!
//! Follows redirects and streams the body straight into the sink from the
//! write callback, so nothing is buffered beyond libcurl's receive buffer.

use std::cell::{Cell, RefCell};
use std::str;

use curl::easy::Easy;

use super::{BodySink, HttpTransport, ResponseHead, TransportError};

/// libcurl receive buffer size; bounds the data handed to one write callback.
const RECV_BUFFER_BYTES: usize = 8 * 1024;

/// [`HttpTransport`] on a fresh `curl::easy::Easy` handle per request.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    user_agent: String,
    max_redirections: u32,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            user_agent: concat!("mdm/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirections: 10,
        }
    }
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn prepare(&self, url: &str) -> Result<Easy, TransportError> {
        let mut easy = Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirections)?;
        easy.buffer_size(RECV_BUFFER_BYTES)?;
        easy.useragent(&self.user_agent)?;
        Ok(easy)
    }
}

impl HttpTransport for CurlTransport {
    fn get_streaming(&self, url: &str, sink: &mut dyn BodySink) -> Result<(), TransportError> {
        let mut easy = self.prepare(url)?;
        let head = RefCell::new(ResponseHead::default());
        let started = Cell::new(false);
        let sink_error: RefCell<Option<std::io::Error>> = RefCell::new(None);

        tracing::debug!(url, "GET");
        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|line| {
                if let Ok(s) = str::from_utf8(line) {
                    head.borrow_mut().push_line(s);
                }
                true
            })?;
            transfer.write_function(|data| {
                let current = *head.borrow();
                if !current.is_success() {
                    // Error page or redirect body: drain it, status is checked after perform.
                    return Ok(data.len());
                }
                if !started.get() {
                    started.set(true);
                    if let Err(e) = sink.begin(&current) {
                        *sink_error.borrow_mut() = Some(e);
                        return Ok(0); // abort transfer
                    }
                }
                match sink.write_chunk(data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        *sink_error.borrow_mut() = Some(e);
                        Ok(0)
                    }
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = sink_error.into_inner() {
            tracing::warn!(url, "transfer aborted by sink: {}", e);
            return Err(TransportError::Sink(e));
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }
        if !started.get() {
            // Empty 2xx body: the sink still gets its begin call.
            sink.begin(&head.into_inner()).map_err(TransportError::Sink)?;
        }
        Ok(())
    }
}
