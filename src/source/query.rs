//! Query parameters attached to a redirect source, plus the blob codec used
//! when a source value is persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SourceError;

/// A single query parameter value: plain text or a nested map
/// (`a[b]=c` style parameters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// A plain string value.
    Text(String),
    /// A nested group of parameters.
    Nested(QueryMap),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parsed query parameters, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryMap(BTreeMap<String, QueryValue>);

impl QueryMap {
    /// Creates an empty query map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Returns `true` when no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of top-level parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Parses `key=value` pairs as given on the command line.
    ///
    /// Keys written as `outer[inner]` become nested maps.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pair that has no `=`.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = Self::new();
        for pair in pairs {
            let (key, value) =
                pair.split_once('=').ok_or_else(|| format!("Invalid query pair '{pair}'"))?;
            map.insert_path(key, value);
        }
        Ok(map)
    }

    fn insert_path(&mut self, key: &str, value: &str) {
        let Some((outer, rest)) = key.split_once('[') else {
            self.insert(key, value);
            return;
        };
        let inner = rest.strip_suffix(']').unwrap_or(rest);
        // `a[b][c]` keeps recursing on `b[c]`.
        let inner = inner.replacen("][", "[", 1);
        let entry = self
            .0
            .entry(outer.to_string())
            .or_insert_with(|| QueryValue::Nested(Self::new()));
        if let QueryValue::Text(_) = entry {
            *entry = QueryValue::Nested(Self::new());
        }
        if let QueryValue::Nested(nested) = entry {
            nested.insert_path(&inner, value);
        }
    }

    /// Flattens the map into `(key, value)` pairs using bracket notation
    /// for nested keys.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        self.flatten_into(None, &mut pairs);
        pairs
    }

    fn flatten_into(&self, prefix: Option<&str>, pairs: &mut Vec<(String, String)>) {
        for (key, value) in &self.0 {
            let name = match prefix {
                Some(prefix) => format!("{prefix}[{key}]"),
                None => key.clone(),
            };
            match value {
                QueryValue::Text(text) => pairs.push((name, text.clone())),
                QueryValue::Nested(nested) => nested.flatten_into(Some(&name), pairs),
            }
        }
    }

    /// Serializes the map into its opaque stored form.
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be serialized.
    pub fn encode_blob(&self) -> Result<String, SourceError> {
        serde_json::to_string(self).map_err(SourceError::Serialization)
    }

    /// Decodes a stored blob. An empty blob is an empty map.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Deserialization` if the blob is not a valid
    /// serialized map.
    pub fn decode_blob(blob: &str) -> Result<Self, SourceError> {
        if blob.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_json::from_str(blob).map_err(SourceError::Deserialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_builds_nested_maps() {
        let map = QueryMap::from_pairs(["page=2", "filter[type]=article", "filter[lang]=en"])
            .unwrap();

        assert_eq!(map.get("page"), Some(&QueryValue::from("2")));
        let Some(QueryValue::Nested(filter)) = map.get("filter") else {
            panic!("filter should be nested");
        };
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.get("lang"), Some(&QueryValue::from("en")));
    }

    #[test]
    fn from_pairs_rejects_pair_without_equals() {
        let err = QueryMap::from_pairs(["page"]).unwrap_err();
        assert!(err.contains("page"));
    }

    #[test]
    fn flatten_uses_bracket_notation() {
        let map = QueryMap::from_pairs(["a[b][c]=1", "z=2"]).unwrap();
        assert_eq!(
            map.flatten(),
            vec![("a[b][c]".to_string(), "1".to_string()), ("z".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn blob_codec_preserves_nested_values() {
        let map = QueryMap::from_pairs(["utm[source]=mail", "id=7"]).unwrap();
        let blob = map.encode_blob().unwrap();
        assert_eq!(QueryMap::decode_blob(&blob).unwrap(), map);
    }

    #[test]
    fn empty_blob_decodes_to_empty_map() {
        assert!(QueryMap::decode_blob("").unwrap().is_empty());
        assert!(QueryMap::decode_blob("  ").unwrap().is_empty());
    }

    #[test]
    fn garbage_blob_is_a_deserialization_error() {
        let err = QueryMap::decode_blob("a:1:{s:3").unwrap_err();
        assert!(matches!(err, SourceError::Deserialization(_)));
    }
}
