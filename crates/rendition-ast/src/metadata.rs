//! Document and scope metadata

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key holding the source syntax id of a document
pub const SYNTAX: &str = "syntax";

/// Key holding the source the content was read from
pub const SOURCE: &str = "source";

/// Key holding the base reference used to resolve relative references
pub const BASE: &str = "base";

/// String-keyed metadata attached to a document or a metadata scope
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaData {
    entries: BTreeMap<String, String>,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_meta_data`](Self::add_meta_data)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_meta_data(key, value);
        self
    }

    pub fn add_meta_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Copy every entry of `other` over this one
    pub fn add_all(&mut self, other: &MetaData) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    pub fn meta_data(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
