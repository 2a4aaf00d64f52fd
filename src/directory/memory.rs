//! In-memory directory, with no backing file.

use parking_lot::RwLock;

use crate::error::Result;
use super::index::Index;
use super::{normalize_name, CountryRecord, Directory};

/// Directory held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    index: RwLock<Index>,
}

impl MemoryDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory from `(country, capital)` pairs, kept as given
    pub fn with_records<I, N, C>(records: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut index = Index::default();
        for (name, capital) in records {
            index.add(CountryRecord::new(name, capital));
        }
        Self {
            index: RwLock::new(index),
        }
    }
}

impl Directory for MemoryDirectory {
    fn lookup(&self, name: &str) -> Result<Option<String>> {
        Ok(self.index.read().get(name).map(|r| r.capital.clone()))
    }

    fn insert(&self, name: &str, capital: &str) -> Result<bool> {
        let mut index = self.index.write();
        Ok(index.add(CountryRecord::new(
            normalize_name(name),
            normalize_name(capital),
        )))
    }

    fn normalize(&self) -> Result<usize> {
        Ok(self.index.write().split_joined())
    }

    fn len(&self) -> usize {
        self.index.read().len()
    }
}
