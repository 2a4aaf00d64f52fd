//! Directory Module
//!
//! Country → capital records consulted by the server dispatcher.
//!
//! ## Responsibilities
//! - Case-insensitive lookup by country name
//! - Guarded insert (an existing country is never duplicated)
//! - One-time normalization of `"A and B"` rows into one row per country
//!
//! ## Concurrency
//! Implementations guard their index with a `parking_lot::RwLock`, so
//! `lookup` takes a read lock and `insert` holds the write lock across the
//! existence check and the write.

mod index;
mod file;
mod memory;

pub use file::CsvDirectory;
pub use memory::MemoryDirectory;

use std::sync::Arc;

use crate::error::Result;

/// Separator between joined country names in a single row
pub const JOINED_COUNTRIES: &str = " and ";

/// A single directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    /// Display form of the country name
    pub name: String,

    /// Capital city
    pub capital: String,
}

impl CountryRecord {
    pub fn new(name: impl Into<String>, capital: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capital: capital.into(),
        }
    }
}

/// Country record store
pub trait Directory: Send + Sync {
    /// Capital of `name`, matched case-insensitively
    fn lookup(&self, name: &str) -> Result<Option<String>>;

    /// Add a record; returns `false` without writing if the country exists
    fn insert(&self, name: &str, capital: &str) -> Result<bool>;

    /// Split rows naming two countries into one row each; returns rows split
    fn normalize(&self) -> Result<usize>;

    /// Number of records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<D: Directory + ?Sized> Directory for Arc<D> {
    fn lookup(&self, name: &str) -> Result<Option<String>> {
        (**self).lookup(name)
    }

    fn insert(&self, name: &str, capital: &str) -> Result<bool> {
        (**self).insert(name, capital)
    }

    fn normalize(&self) -> Result<usize> {
        (**self).normalize()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Trim and capitalize each word: `"  birnin ZANA "` → `"Birnin Zana"`
pub fn normalize_name(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a joined `"A and B"` name, if it is one
pub(crate) fn split_joined(name: &str) -> Option<(&str, &str)> {
    name.split_once(JOINED_COUNTRIES)
        .map(|(first, second)| (first.trim(), second.trim()))
        .filter(|(first, second)| !first.is_empty() && !second.is_empty())
}
