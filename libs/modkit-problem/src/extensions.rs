//! Free-form extension members of a Problem.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ProblemError;

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Json(Value),
    /// The value could not be converted to JSON; holds the codec message.
    Unencodable(String),
}

/// Extension members keyed by name.
///
/// Values are stored as [`serde_json::Value`]. A value whose `Serialize` impl
/// fails is kept as an unencodable entry so the failure surfaces when the
/// owning Problem is serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    entries: BTreeMap<String, Entry>,
}

impl Extensions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert<V>(&mut self, key: String, value: V)
    where
        V: Serialize,
    {
        let entry = match serde_json::to_value(value) {
            Ok(json) => Entry::Json(json),
            Err(err) => Entry::Unencodable(err.to_string()),
        };
        self.entries.insert(key, entry);
    }

    pub(crate) fn insert_value(&mut self, key: String, value: Value) {
        self.entries.insert(key, Entry::Json(value));
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// JSON value stored under `key`. Unencodable entries read as `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key) {
            Some(Entry::Json(value)) => Some(value),
            Some(Entry::Unencodable(_)) | None => None,
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Encodable entries in key order. Unencodable entries are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            Entry::Json(value) => Some((key.as_str(), value)),
            Entry::Unencodable(_) => None,
        })
    }

    /// Copy every entry into a JSON object map.
    ///
    /// # Errors
    /// Returns [`ProblemError::Encoding`] for the first unencodable entry.
    pub fn to_map(&self) -> Result<Map<String, Value>, ProblemError> {
        let mut map = Map::new();
        self.write_into(&mut map)?;
        Ok(map)
    }

    /// Insert every entry into `map`, overwriting keys already present.
    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) -> Result<(), ProblemError> {
        for (key, entry) in &self.entries {
            match entry {
                Entry::Json(value) => {
                    map.insert(key.clone(), value.clone());
                }
                Entry::Unencodable(message) => {
                    return Err(ProblemError::Encoding(format!("extension '{key}': {message}")));
                }
            }
        }
        Ok(())
    }
}

impl From<Map<String, Value>> for Extensions {
    fn from(map: Map<String, Value>) -> Self {
        let mut extensions = Self::new();
        for (key, value) in map {
            extensions.insert_value(key, value);
        }
        extensions
    }
}
