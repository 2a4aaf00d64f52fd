//! File-backed directory
//!
//! ## File Format
//! ```text
//! Country,City
//! "Korea, South",Seoul
//! Trinidad and Tobago,Port of Spain
//! ```
//! Standard CSV read and written with the `csv` crate, so a field holding a
//! comma is quoted. The first row is the header. The whole file is indexed
//! in memory on open; inserts append a row, normalization rewrites the file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use parking_lot::RwLock;

use crate::error::{GeoError, Result};
use super::index::Index;
use super::{normalize_name, CountryRecord, Directory};

/// Header row written at the top of every directory file
pub const HEADER: [&str; 2] = ["Country", "City"];

/// Directory persisted as a `Country,City` CSV file
#[derive(Debug)]
pub struct CsvDirectory {
    /// Backing file
    path: PathBuf,

    /// In-memory view of the file; writers hold the lock while touching it
    index: RwLock<Index>,
}

impl CsvDirectory {
    /// Open an existing directory file and index it
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let index = Self::load(&path)?;

        tracing::info!(
            path = %path.display(),
            records = index.len(),
            "Directory loaded"
        );

        Ok(Self {
            path,
            index: RwLock::new(index),
        })
    }

    /// Create (or overwrite) a directory file holding `records`
    pub fn create<'a, I>(path: impl AsRef<Path>, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let path = path.as_ref().to_path_buf();
        let mut index = Index::default();
        for (name, capital) in records {
            index.add(CountryRecord::new(name.trim(), capital.trim()));
        }
        Self::rewrite(&path, &index)?;

        Ok(Self {
            path,
            index: RwLock::new(index),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Index> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GeoError::Directory(format!(
                "Countries file {} not found. Please make sure it exists or pass --file.",
                path.display()
            )),
            _ => GeoError::Io(e),
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);

        let mut index = Index::default();
        for row in reader.records() {
            let row = row?;
            match (row.get(0), row.get(1)) {
                (Some(name), Some(capital)) if !name.is_empty() => {
                    index.add(CountryRecord::new(name, capital));
                }
                _ => {
                    tracing::warn!(
                        line = row.position().map(|p| p.line()),
                        row = ?row,
                        "Skipping malformed directory row"
                    );
                }
            }
        }

        Ok(index)
    }

    /// Rewrite the whole file from `index` via a temporary file
    fn rewrite(path: &Path, index: &Index) -> Result<()> {
        let tmp_path = path.with_extension("tmp");

        let mut writer = WriterBuilder::new().from_writer(File::create(&tmp_path)?);
        writer.write_record(HEADER)?;
        for record in index.records() {
            writer.write_record([&record.name, &record.capital])?;
        }
        let file = writer.into_inner().map_err(|e| GeoError::Io(e.into_error()))?;
        file.sync_all()?;

        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Append one row, adding a line break first if the file lacks one
    fn append(&self, record: &CountryRecord) -> Result<()> {
        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;

        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = WriterBuilder::new().from_writer(&mut file);
        writer.write_record([&record.name, &record.capital])?;
        writer.flush()?;
        drop(writer);

        file.sync_data()?;
        Ok(())
    }
}

impl Directory for CsvDirectory {
    fn lookup(&self, name: &str) -> Result<Option<String>> {
        Ok(self.index.read().get(name).map(|r| r.capital.clone()))
    }

    fn insert(&self, name: &str, capital: &str) -> Result<bool> {
        let record = CountryRecord::new(normalize_name(name), normalize_name(capital));

        let mut index = self.index.write();
        if index.contains(&record.name) {
            return Ok(false);
        }

        // File first: a failed write leaves the index untouched
        self.append(&record)?;
        index.add(record);
        Ok(true)
    }

    fn normalize(&self) -> Result<usize> {
        let mut index = self.index.write();
        let split = index.split_joined();

        if split > 0 {
            Self::rewrite(&self.path, &index)?;
            tracing::info!(rows = split, "Split rows naming multiple countries");
        }

        Ok(split)
    }

    fn len(&self) -> usize {
        self.index.read().len()
    }
}
