//! # Storage Layer
//!
//! The [`DataStore`] trait abstracts the per-project record store so the
//! command layer can run against different backends.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - One dated folder per project: `<project_code>_<YYYYMMDD>`
//!   - One flat table per folder: `jobs.csv`
//!   - Full-table rewrite on every mutation (write temp file, then rename)
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <storage_root>/
//! ├── PROJ-001_20260314/
//! │   └── jobs.csv
//! └── PROJ-002_20260401/
//!     └── jobs.csv
//! ```
//!
//! A missing folder or table is treated as an empty table, never as an error.
//! The store assumes a single operator: no locking, no concurrent-writer
//! protection. Callers issue short synchronous read-mutate-rewrite calls.

use crate::error::Result;
use crate::model::{RunRecord, FIELD_NAMES};
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

/// Outcome of [`DataStore::ensure_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    /// Folder and header-only table were created.
    Created,
    /// The table already existed and was left untouched.
    Existed,
}

/// Report from [`DataStore::clear_all`]. Folder removals are attempted
/// independently; failures are collected here instead of aborting the sweep.
#[derive(Debug, Default)]
pub struct ClearAllReport {
    pub removed: usize,
    pub errors: Vec<String>,
}

/// Abstract interface for per-project run-record storage.
///
/// Rows within a project are identified by the string pair
/// `(task_number, attempt_number)`; the trait itself only deals in whole
/// tables. Key lookup and the upsert merge rule live in the command layer.
pub trait DataStore {
    /// Current storage root.
    fn storage_root(&self) -> &Path;

    /// Relocate the storage root for all subsequent operations. Existing
    /// data is not moved or copied.
    fn set_storage_root(&mut self, root: PathBuf);

    /// The dated folder name for a project. Reuses the most recent existing
    /// folder with the `<code>_` prefix; otherwise today's date is stamped.
    fn resolve_folder(&self, project_code: &str) -> String;

    /// Distinct project codes found under the storage root, sorted.
    /// Malformed or foreign directory names are silently skipped.
    fn list_projects(&self) -> Result<Vec<String>>;

    /// Whether the project's table has ever been written.
    fn table_exists(&self, project_code: &str) -> bool;

    /// Ensure the project folder and a headered table exist. Never truncates
    /// an existing table.
    fn ensure_table(&mut self, project_code: &str) -> Result<OpenStatus>;

    /// All rows of the project's table, in file order. Missing table reads
    /// as an empty list.
    fn load_rows(&self, project_code: &str) -> Result<Vec<RunRecord>>;

    /// Replace the project's table with the given rows (header always
    /// written). The write is all-or-nothing.
    fn write_rows(&mut self, project_code: &str, rows: &[RunRecord]) -> Result<()>;

    /// The table in wire format, header-only if nothing was ever written.
    fn export_bytes(&self, project_code: &str) -> Result<Vec<u8>>;

    /// Remove every project folder under the storage root, attempting each
    /// one independently.
    fn clear_all(&mut self) -> Result<ClearAllReport>;
}

/// Serialize rows to the on-disk wire format: UTF-8 CSV with the fixed
/// [`FIELD_NAMES`] header row.
pub fn rows_to_csv_bytes(rows: &[RunRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(FIELD_NAMES)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::error::FieldlogError::Store(e.to_string()))
}

/// Parse wire-format bytes back into rows. Rows are matched to fields by
/// header name; missing fields read as empty.
pub fn csv_bytes_to_rows(bytes: &[u8]) -> Result<Vec<RunRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
