//! MDM core: pick the best download from a remote catalog and fetch it with
//! progress reporting.

pub mod config;
pub mod logging;

pub mod asset_cache;
pub mod capability;
pub mod catalog;
pub mod downloader;
pub mod error;
pub mod select;
pub mod session;
pub mod transport;
pub mod url_model;

#[cfg(test)]
mod test_support;

pub use error::SessionError;
