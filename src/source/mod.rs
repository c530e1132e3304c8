//! Redirect source values: the path (plus query) a redirect triggers on.
//!
//! A source value is attached to a host content item. It is considered empty
//! when it has no path; the query map is optional.

mod query;

pub use query::{QueryMap, QueryValue};

use serde::Deserialize;
use thiserror::Error;

/// Longest path a source value accepts.
pub const MAX_PATH_LENGTH: usize = 2048;

/// Errors raised while building or decoding a source value.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The path exceeds [`MAX_PATH_LENGTH`] characters.
    #[error("source path is {len} characters long, the limit is {max}")]
    PathTooLong {
        /// Length of the rejected path.
        len: usize,
        /// The enforced limit.
        max: usize,
    },
    /// The query map could not be serialized.
    #[error("failed to serialize source query: {0}")]
    Serialization(#[source] serde_json::Error),
    /// A stored query blob is not valid serialized data.
    #[error("failed to decode stored source query: {0}")]
    Deserialization(#[source] serde_json::Error),
}

/// The redirect source stored on a host content item.
///
/// Deserialized values go through [`RedirectSourceValue::new`], so the path
/// limit holds however a value is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawSourceValue")]
pub struct RedirectSourceValue {
    path: String,
    query: QueryMap,
}

/// Unchecked field layout read by serde.
#[derive(Deserialize)]
struct RawSourceValue {
    #[serde(default)]
    path: String,
    #[serde(default)]
    query: QueryMap,
}

impl TryFrom<RawSourceValue> for RedirectSourceValue {
    type Error = SourceError;

    fn try_from(raw: RawSourceValue) -> Result<Self, Self::Error> {
        Self::new(raw.path, raw.query)
    }
}

impl RedirectSourceValue {
    /// Builds a source value from a path and query map.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::PathTooLong` if `path` exceeds
    /// [`MAX_PATH_LENGTH`] characters.
    pub fn new(path: impl Into<String>, query: QueryMap) -> Result<Self, SourceError> {
        let path = path.into();
        let len = path.chars().count();
        if len > MAX_PATH_LENGTH {
            return Err(SourceError::PathTooLong { len, max: MAX_PATH_LENGTH });
        }
        Ok(Self { path, query })
    }

    /// Builds a source value from a path with no query.
    ///
    /// # Errors
    ///
    /// Same as [`RedirectSourceValue::new`].
    pub fn from_path(path: impl Into<String>) -> Result<Self, SourceError> {
        Self::new(path, QueryMap::new())
    }

    /// Rebuilds a value from its persisted columns, decoding the query blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is too long or the blob cannot be decoded.
    pub fn from_stored(path: impl Into<String>, query_blob: &str) -> Result<Self, SourceError> {
        Self::new(path, QueryMap::decode_blob(query_blob)?)
    }

    /// Name of the property that identifies the value.
    #[must_use]
    pub const fn main_property() -> &'static str {
        "path"
    }

    /// The source path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The parsed query parameters.
    #[must_use]
    pub fn query(&self) -> &QueryMap {
        &self.query
    }

    /// A value with no path carries nothing to redirect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Renders the value as a `base:` link target with its query appended.
    #[must_use]
    pub fn to_url(&self) -> String {
        let mut url = format!("base:{}", self.path);
        if !self.query.is_empty() {
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in self.query.flatten() {
                serializer.append_pair(&key, &value);
            }
            url.push('?');
            url.push_str(&serializer.finish());
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_iff_path_is_empty() {
        assert!(RedirectSourceValue::default().is_empty());
        assert!(RedirectSourceValue::from_path("").unwrap().is_empty());

        let with_query_only =
            RedirectSourceValue::new("", QueryMap::from_pairs(["a=1"]).unwrap()).unwrap();
        assert!(with_query_only.is_empty());

        assert!(!RedirectSourceValue::from_path("old-page").unwrap().is_empty());
    }

    #[test]
    fn rejects_paths_over_the_limit() {
        let at_limit = "a".repeat(MAX_PATH_LENGTH);
        assert!(RedirectSourceValue::from_path(at_limit).is_ok());

        let too_long = "a".repeat(MAX_PATH_LENGTH + 1);
        let err = RedirectSourceValue::from_path(too_long).unwrap_err();
        assert!(matches!(err, SourceError::PathTooLong { len: 2049, max: 2048 }));
    }

    #[test]
    fn missing_path_deserializes_as_empty() {
        let value: RedirectSourceValue = serde_yaml::from_str("query: {}\n").unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn deserializing_enforces_the_path_limit() {
        let yaml = format!("path: {}\n", "a".repeat(MAX_PATH_LENGTH + 1));
        let err = serde_yaml::from_str::<RedirectSourceValue>(&yaml).unwrap_err();
        assert!(err.to_string().contains("limit is 2048"), "{err}");

        let yaml = format!("path: {}\nquery:\n  page: '2'\n", "a".repeat(MAX_PATH_LENGTH));
        let value: RedirectSourceValue = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value.path().len(), MAX_PATH_LENGTH);
        assert_eq!(value.query().get("page"), Some(&QueryValue::from("2")));
    }

    #[test]
    fn to_url_appends_encoded_query() {
        let query = QueryMap::from_pairs(["q=hello world", "f[type]=page"]).unwrap();
        let value = RedirectSourceValue::new("search", query).unwrap();
        assert_eq!(value.to_url(), "base:search?f%5Btype%5D=page&q=hello+world");
    }

    #[test]
    fn to_url_without_query() {
        let value = RedirectSourceValue::from_path("old-page").unwrap();
        assert_eq!(value.to_url(), "base:old-page");
    }

    #[test]
    fn from_stored_decodes_blob_once() {
        let value = RedirectSourceValue::from_stored("old", r#"{"page":"2"}"#).unwrap();
        assert_eq!(value.query().get("page"), Some(&QueryValue::from("2")));

        let err = RedirectSourceValue::from_stored("old", "not a blob").unwrap_err();
        assert!(matches!(err, SourceError::Deserialization(_)));
    }

    #[test]
    fn main_property_is_path() {
        assert_eq!(RedirectSourceValue::main_property(), "path");
    }
}
