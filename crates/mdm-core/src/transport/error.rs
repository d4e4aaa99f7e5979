//! Transport error type.

use std::fmt;

/// Failure of a single GET.
#[derive(Debug)]
pub enum TransportError {
    /// libcurl reported an error (DNS, connect, TLS, reset...).
    Curl(curl::Error),
    /// The final response had a non-2xx status.
    Http(u32),
    /// The body sink failed (local disk write); the transfer was aborted.
    Sink(std::io::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Curl(e) => write!(f, "{}", e),
            TransportError::Http(code) => write!(f, "HTTP {}", code),
            TransportError::Sink(e) => write!(f, "write: {}", e),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Curl(e) => Some(e),
            TransportError::Sink(e) => Some(e),
            TransportError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        TransportError::Curl(e)
    }
}
