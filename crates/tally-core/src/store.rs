//! Transaction store
//!
//! A process-wide, read-mostly collection of enriched transaction records
//! loaded once from `metadata.json` at startup. The record order is
//! index-aligned with the vector index built alongside it, so position i in
//! the store corresponds to vector i in the index.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::models::TransactionRecord;

/// File names written by the index builder
pub const INDEX_FILE: &str = "index.json";
pub const METADATA_FILE: &str = "metadata.json";

/// Resolved locations of the two persisted index files
///
/// Both flat (`<dir>/index.json`) and nested (`<dir>/index/index.json`)
/// layouts are supported. Each file is resolved independently, so a mixed
/// layout (flat index, nested metadata) also works; the flat location wins
/// when a file exists in both.
#[derive(Debug, Clone)]
pub struct IndexPaths {
    pub index: PathBuf,
    pub metadata: PathBuf,
}

impl IndexPaths {
    pub fn resolve(dir: &Path) -> Result<Self> {
        let index = Self::locate(dir, INDEX_FILE);
        let metadata = Self::locate(dir, METADATA_FILE);

        // Absence of either file is a fatal startup error
        if !index.exists() || !metadata.exists() {
            return Err(Error::NotFound(format!(
                "missing vector index or metadata file (index: {}, metadata: {})",
                index.display(),
                metadata.display()
            )));
        }

        Ok(Self { index, metadata })
    }

    fn locate(dir: &Path, file: &str) -> PathBuf {
        let flat = dir.join(file);
        if flat.exists() {
            flat
        } else {
            dir.join("index").join(file)
        }
    }
}

/// Immutable, index-aligned transaction records
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    records: Vec<TransactionRecord>,
}

impl TransactionStore {
    /// Load records from a metadata file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let records: Vec<TransactionRecord> = serde_json::from_str(&raw)?;
        info!(count = records.len(), path = %path.display(), "Loaded transaction store");
        Ok(Self { records })
    }

    /// Build a store directly from records (index builds and tests)
    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&TransactionRecord> {
        self.records.get(idx)
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }
}
