//! In-memory index shared by the directory implementations.

use std::collections::HashMap;

use super::{split_joined, CountryRecord};

/// Records keyed by lowercase country name, in insertion order
#[derive(Debug, Default)]
pub(crate) struct Index {
    records: Vec<CountryRecord>,
    positions: HashMap<String, usize>,
}

impl Index {
    fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&CountryRecord> {
        self.positions
            .get(&Self::key(name))
            .map(|&position| &self.records[position])
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(&Self::key(name))
    }

    /// Add a record; the first record for a name wins
    pub(crate) fn add(&mut self, record: CountryRecord) -> bool {
        let key = Self::key(&record.name);
        if self.positions.contains_key(&key) {
            return false;
        }
        self.positions.insert(key, self.records.len());
        self.records.push(record);
        true
    }

    /// Replace every joined record with one record per country, in place
    pub(crate) fn split_joined(&mut self) -> usize {
        let mut split = 0;
        let mut rebuilt = Index::default();

        for record in self.records.drain(..) {
            match split_joined(&record.name) {
                Some((first, second)) => {
                    split += 1;
                    rebuilt.add(CountryRecord::new(first, record.capital.clone()));
                    rebuilt.add(CountryRecord::new(second, record.capital));
                }
                None => {
                    rebuilt.add(record);
                }
            }
        }

        *self = rebuilt;
        split
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn records(&self) -> &[CountryRecord] {
        &self.records
    }
}
