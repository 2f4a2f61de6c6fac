//! In-memory resource table.
//!
//! Paths map to byte contents. Ordering is deterministic so that listings
//! and test output are stable.

use std::collections::BTreeMap;

/// The server's files.
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    files: BTreeMap<String, Vec<u8>>,
}

impl ResourceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of `path`.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Create or replace `path`.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Append to an existing file. Returns false if `path` does not exist.
    pub fn append(&mut self, path: &str, data: &[u8]) -> bool {
        match self.files.get_mut(path) {
            Some(contents) => {
                contents.extend_from_slice(data);
                true
            }
            None => false,
        }
    }

    /// All paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
