use super::{csv_bytes_to_rows, rows_to_csv_bytes, ClearAllReport, DataStore, OpenStatus};
use crate::error::{FieldlogError, Result};
use crate::model::RunRecord;
use chrono::Local;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const TABLE_FILENAME: &str = "jobs.csv";

/// File-based record store. One dated folder per project under the storage
/// root, one `jobs.csv` per folder.
pub struct FileStore {
    storage_root: PathBuf,
}

impl FileStore {
    pub fn new(storage_root: PathBuf) -> Self {
        Self { storage_root }
    }

    /// Absolute path of the project's dated folder.
    pub fn project_dir(&self, project_code: &str) -> PathBuf {
        self.storage_root.join(self.resolve_folder(project_code))
    }

    /// Absolute path of the project's table file.
    pub fn table_path(&self, project_code: &str) -> PathBuf {
        self.project_dir(project_code).join(TABLE_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(FieldlogError::Io)?;
        }
        Ok(())
    }

    /// All-or-nothing table write: serialize to a sibling temp file, then
    /// rename over the table. A failed write never leaves a partial table.
    fn write_table(&self, path: &Path, rows: &[RunRecord]) -> Result<()> {
        let bytes = rows_to_csv_bytes(rows)?;
        let tmp = path.with_extension("csv.tmp");
        fs::write(&tmp, bytes).map_err(FieldlogError::Io)?;
        fs::rename(&tmp, path).map_err(FieldlogError::Io)?;
        Ok(())
    }

    fn dir_names(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.storage_root) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect()
    }
}

impl DataStore for FileStore {
    fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    fn set_storage_root(&mut self, root: PathBuf) {
        self.storage_root = root;
    }

    fn resolve_folder(&self, project_code: &str) -> String {
        let today = format!(
            "{}_{}",
            project_code,
            Local::now().format("%Y%m%d")
        );
        let prefix = format!("{}_", project_code);
        let mut candidates: Vec<String> = self
            .dir_names()
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .collect();
        candidates.sort();
        candidates.pop().unwrap_or(today)
    }

    fn list_projects(&self) -> Result<Vec<String>> {
        let mut codes = BTreeSet::new();
        for name in self.dir_names() {
            // Folder name is <code>_YYYYMMDD; strip the trailing date
            if let Some((code, date)) = name.rsplit_once('_') {
                if date.len() == 8 && date.chars().all(|c| c.is_ascii_digit()) {
                    codes.insert(code.to_string());
                }
            }
        }
        Ok(codes.into_iter().collect())
    }

    fn table_exists(&self, project_code: &str) -> bool {
        self.table_path(project_code).exists()
    }

    fn ensure_table(&mut self, project_code: &str) -> Result<OpenStatus> {
        let dir = self.project_dir(project_code);
        self.ensure_dir(&dir)?;
        let path = dir.join(TABLE_FILENAME);
        if path.exists() {
            return Ok(OpenStatus::Existed);
        }
        self.write_table(&path, &[])?;
        Ok(OpenStatus::Created)
    }

    fn load_rows(&self, project_code: &str) -> Result<Vec<RunRecord>> {
        let path = self.table_path(project_code);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&path).map_err(FieldlogError::Io)?;
        csv_bytes_to_rows(&bytes)
    }

    fn write_rows(&mut self, project_code: &str, rows: &[RunRecord]) -> Result<()> {
        let dir = self.project_dir(project_code);
        self.ensure_dir(&dir)?;
        self.write_table(&dir.join(TABLE_FILENAME), rows)
    }

    fn export_bytes(&self, project_code: &str) -> Result<Vec<u8>> {
        let path = self.table_path(project_code);
        if path.exists() {
            return fs::read(&path).map_err(FieldlogError::Io);
        }
        // Headers-only CSV if nothing saved yet
        rows_to_csv_bytes(&[])
    }

    fn clear_all(&mut self) -> Result<ClearAllReport> {
        let mut report = ClearAllReport::default();
        for name in self.dir_names() {
            let path = self.storage_root.join(&name);
            match fs::remove_dir_all(&path) {
                Ok(()) => report.removed += 1,
                Err(e) => report.errors.push(format!("{}: {}", name, e)),
            }
        }
        Ok(report)
    }
}
