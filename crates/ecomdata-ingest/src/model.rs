use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options for an ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Directory holding the generated CSV files.
    pub data_dir: PathBuf,
    /// SQLite database file, replaced on every run.
    pub db_path: PathBuf,
    /// Turn on `PRAGMA foreign_keys` for the load.
    pub enforce_foreign_keys: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            db_path: PathBuf::from("db/ecom.db"),
            enforce_foreign_keys: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedTable {
    pub table: String,
    pub rows: u64,
}

/// Report for an ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub db_path: PathBuf,
    pub tables: Vec<LoadedTable>,
    pub duration_ms: u64,
}

impl IngestReport {
    pub fn rows(&self, table: &str) -> Option<u64> {
        self.tables
            .iter()
            .find(|loaded| loaded.table == table)
            .map(|loaded| loaded.rows)
    }
}
