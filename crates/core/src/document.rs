//! Aggregate documents
//!
//! An aggregate document is a whole domain (every collection, or every
//! provider) held as one JSON object of `child key -> record`. It is the unit
//! the backend stores: loaded in full, mutated in memory, written back in full.
//! There is no per-child storage key and no secondary index.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Mapping of child key to child record, serialized as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateDocument<R> {
    children: BTreeMap<String, R>,
}

impl<R> Default for AggregateDocument<R> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
        }
    }
}

impl<R> AggregateDocument<R> {
    /// An empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the document has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether a child key is present
    pub fn contains(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// Look up a child
    pub fn get(&self, key: &str) -> Option<&R> {
        self.children.get(key)
    }

    /// Look up a child mutably
    pub fn get_mut(&mut self, key: &str) -> Option<&mut R> {
        self.children.get_mut(key)
    }

    /// Insert a child, returning any record previously under the key
    pub fn insert(&mut self, key: String, record: R) -> Option<R> {
        self.children.insert(key, record)
    }

    /// Remove a child
    pub fn remove(&mut self, key: &str) -> Option<R> {
        self.children.remove(key)
    }

    /// Child keys in lexical order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.children.keys()
    }

    /// Children in lexical key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, R> {
        self.children.iter()
    }
}

impl<R: Serialize> AggregateDocument<R> {
    /// Serialize to the stored blob format
    pub fn to_blob(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::from)
    }
}

impl<R: DeserializeOwned> AggregateDocument<R> {
    /// Decode a stored blob read from `root`.
    ///
    /// A blob that does not decode is reported as `Corrupt`, never treated as
    /// an empty document.
    pub fn from_blob(root: &str, blob: &str) -> Result<Self> {
        serde_json::from_str(blob).map_err(|e| Error::corrupt(root, e))
    }
}

impl<'a, R> IntoIterator for &'a AggregateDocument<R> {
    type Item = (&'a String, &'a R);
    type IntoIter = btree_map::Iter<'a, String, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
