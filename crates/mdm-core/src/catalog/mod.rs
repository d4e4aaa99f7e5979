//! Remote catalog records.
//!
//! The catalog is a JSON array of loosely typed objects. Each value is kept as
//! a [`CatalogValue`] and read through type-checked accessors, so a field of
//! the wrong kind is simply "not a number" / "not text" instead of a fault.

mod fetch;

pub use fetch::{CatalogFetcher, CATALOG_URL};

use serde::Deserialize;
use std::collections::BTreeMap;

/// Record keys (case-sensitive).
pub const KEY_TITLE: &str = "Title";
pub const KEY_FILE_URL: &str = "FileURL";
pub const KEY_IMAGE_URL: &str = "ImageURL";
pub const KEY_SCORE: &str = "Score";
pub const KEY_OS: &str = "os";
pub const KEY_RAM: &str = "ram";
pub const KEY_DISK: &str = "disk";

/// Catalog payload errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Malformed JSON or not an array of objects.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// The selected record lacks a required field.
    #[error("record has no usable `{0}` field")]
    MissingField(&'static str),
}

/// One value of a catalog record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CatalogValue {
    String(String),
    Number(serde_json::Number),
    /// Anything else: bool, null, array, object.
    Other(serde_json::Value),
}

impl CatalogValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CatalogValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Integer value of a number; non-integral values truncate toward zero
    /// and out-of-range values saturate.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CatalogValue::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|_| i64::MAX))
                .or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }

    /// Text form: strings as-is, numbers as their JSON text.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CatalogValue::String(s) => Some(s.clone()),
            CatalogValue::Number(n) => Some(n.to_string()),
            CatalogValue::Other(_) => None,
        }
    }
}

/// One candidate item as received from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CatalogRecord {
    fields: BTreeMap<String, CatalogValue>,
}

impl CatalogRecord {
    pub fn get(&self, key: &str) -> Option<&CatalogValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Numeric value of `key`, if present and a number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(CatalogValue::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(CatalogValue::as_text)
    }
}

impl FromIterator<(String, CatalogValue)> for CatalogRecord {
    fn from_iter<I: IntoIterator<Item = (String, CatalogValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Parses a catalog body. A JSON `null` is an empty catalog.
pub fn parse_catalog(body: &[u8]) -> Result<Vec<CatalogRecord>, CatalogError> {
    let records: Option<Vec<CatalogRecord>> = serde_json::from_slice(body)?;
    Ok(records.unwrap_or_default())
}

/// The selected record, reduced to what the session needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub file_url: String,
    pub image_url: String,
}

impl Candidate {
    pub fn from_record(record: &CatalogRecord) -> Result<Self, CatalogError> {
        let field = |key: &'static str| record.text(key).ok_or(CatalogError::MissingField(key));
        Ok(Self {
            title: field(KEY_TITLE)?,
            file_url: field(KEY_FILE_URL)?,
            image_url: field(KEY_IMAGE_URL)?,
        })
    }
}
