use super::{rows_to_csv_bytes, ClearAllReport, DataStore, OpenStatus};
use crate::error::Result;
use crate::model::RunRecord;
use chrono::Local;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// In-memory record store for tests. Tracks folder names per project so the
/// dated-folder naming behaves like [`super::fs::FileStore`], without disk.
pub struct InMemoryStore {
    storage_root: PathBuf,
    folders: BTreeMap<String, String>,
    tables: BTreeMap<String, Vec<RunRecord>>,
    locked: HashSet<String>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            storage_root: PathBuf::from("/in-memory"),
            folders: BTreeMap::new(),
            tables: BTreeMap::new(),
            locked: HashSet::new(),
        }
    }

    fn record_folder(&mut self, project_code: &str) {
        let folder = self.resolve_folder(project_code);
        self.folders.insert(project_code.to_string(), folder);
    }

    /// Make `clear_all` fail for this project's folder, simulating a locked
    /// file or permission error.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn lock_project(&mut self, project_code: &str) {
        self.locked.insert(project_code.to_string());
    }
}

impl DataStore for InMemoryStore {
    fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    fn set_storage_root(&mut self, root: PathBuf) {
        self.storage_root = root;
    }

    fn resolve_folder(&self, project_code: &str) -> String {
        match self.folders.get(project_code) {
            Some(folder) => folder.clone(),
            None => format!("{}_{}", project_code, Local::now().format("%Y%m%d")),
        }
    }

    fn list_projects(&self) -> Result<Vec<String>> {
        Ok(self.folders.keys().cloned().collect())
    }

    fn table_exists(&self, project_code: &str) -> bool {
        self.tables.contains_key(project_code)
    }

    fn ensure_table(&mut self, project_code: &str) -> Result<OpenStatus> {
        self.record_folder(project_code);
        if self.tables.contains_key(project_code) {
            return Ok(OpenStatus::Existed);
        }
        self.tables.insert(project_code.to_string(), Vec::new());
        Ok(OpenStatus::Created)
    }

    fn load_rows(&self, project_code: &str) -> Result<Vec<RunRecord>> {
        Ok(self.tables.get(project_code).cloned().unwrap_or_default())
    }

    fn write_rows(&mut self, project_code: &str, rows: &[RunRecord]) -> Result<()> {
        self.record_folder(project_code);
        self.tables.insert(project_code.to_string(), rows.to_vec());
        Ok(())
    }

    fn export_bytes(&self, project_code: &str) -> Result<Vec<u8>> {
        let rows = self.tables.get(project_code).cloned().unwrap_or_default();
        rows_to_csv_bytes(&rows)
    }

    fn clear_all(&mut self) -> Result<ClearAllReport> {
        let mut report = ClearAllReport::default();
        let codes: Vec<String> = self.folders.keys().cloned().collect();
        for code in codes {
            if self.locked.contains(&code) {
                let folder = self.resolve_folder(&code);
                report.errors.push(format!("{}: permission denied", folder));
                continue;
            }
            self.folders.remove(&code);
            self.tables.remove(&code);
            report.removed += 1;
        }
        Ok(report)
    }
}
