//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::transport::{BodySink, HttpTransport, ResponseHead, TransportError};

/// Canned response for one URL.
#[derive(Debug, Clone)]
pub struct FakeResponse {
    pub status: u32,
    pub body: Vec<u8>,
    /// Send `Content-Length`.
    pub content_length: bool,
    /// Size of each piece handed to the sink.
    pub delivery_chunk: usize,
    /// Fail with a receive error after this many body bytes.
    pub fail_after: Option<usize>,
}

impl FakeResponse {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            content_length: true,
            delivery_chunk: usize::MAX,
            fail_after: None,
        }
    }

    pub fn status(status: u32) -> Self {
        Self {
            status,
            ..Self::ok(Vec::new())
        }
    }

    pub fn without_length(mut self) -> Self {
        self.content_length = false;
        self
    }

    pub fn delivered_in(mut self, chunk: usize) -> Self {
        self.delivery_chunk = chunk;
        self
    }

    pub fn failing_after(mut self, bytes: usize) -> Self {
        self.fail_after = Some(bytes);
        self
    }
}

/// Transport answering from a route table and counting requests per URL.
#[derive(Default)]
pub struct FakeTransport {
    routes: HashMap<String, FakeResponse>,
    hits: Mutex<HashMap<String, usize>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, response: FakeResponse) -> Self {
        self.routes.insert(url.to_string(), response);
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }
}

impl HttpTransport for FakeTransport {
    fn get_streaming(&self, url: &str, sink: &mut dyn BodySink) -> Result<(), TransportError> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_default() += 1;
        let response = self.routes.get(url).ok_or(TransportError::Http(404))?;
        if !(200..300).contains(&response.status) {
            return Err(TransportError::Http(response.status));
        }

        let head = ResponseHead {
            status: response.status,
            content_length: response.content_length.then_some(response.body.len() as u64),
        };
        sink.begin(&head).map_err(TransportError::Sink)?;

        let limit = response.fail_after.unwrap_or(response.body.len());
        let mut sent = 0;
        for piece in response.body[..limit.min(response.body.len())].chunks(response.delivery_chunk) {
            sink.write_chunk(piece).map_err(TransportError::Sink)?;
            sent += piece.len();
        }
        if response.fail_after.is_some() && sent < response.body.len() {
            return Err(TransportError::Curl(curl::Error::new(56)));
        }
        Ok(())
    }
}
