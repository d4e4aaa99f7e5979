//! Session-level error taxonomy.

use crate::catalog::CatalogError;
use crate::transport::TransportError;

/// Failure of a catalog, image or file operation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Transport or HTTP status failure.
    #[error("network error: {0}")]
    Network(TransportError),
    /// Malformed catalog payload or a selected record missing a required field.
    #[error("invalid catalog: {0}")]
    Parse(#[from] CatalogError),
    /// Local disk failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The catalog had no record passing the filters.
    #[error("no eligible candidate in catalog")]
    NotFound,
    /// `start_download` was called before a candidate was selected.
    #[error("no file selected for download")]
    NoSelection,
    /// `start_download` was called while a download is running.
    #[error("a download is already in progress")]
    Busy,
}

impl From<TransportError> for SessionError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Sink(io) => SessionError::Io(io),
            other => SessionError::Network(other),
        }
    }
}

impl From<tokio::task::JoinError> for SessionError {
    fn from(e: tokio::task::JoinError) -> Self {
        SessionError::Io(std::io::Error::other(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_failure_is_io() {
        let e: SessionError = TransportError::Sink(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        ))
        .into();
        assert!(matches!(e, SessionError::Io(_)));
    }

    #[test]
    fn status_failure_is_network() {
        let e: SessionError = TransportError::Http(503).into();
        assert!(matches!(e, SessionError::Network(TransportError::Http(503))));
        assert_eq!(e.to_string(), "network error: HTTP 503");
    }
}
