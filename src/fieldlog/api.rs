//! # API Facade
//!
//! Thin facade over the command layer, the single entry point for all
//! fieldlog operations, whatever the UI. It dispatches to commands, returns
//! structured `Result<CmdResult>` values, and does no I/O formatting of its
//! own. `FieldlogApi<S: DataStore>` is generic over the storage backend:
//! `FileStore` in production, `InMemoryStore` in tests.

use crate::commands;
use crate::error::Result;
use crate::model::{ProjectMeta, RunData, RunRecord};
use crate::store::DataStore;
use std::path::{Path, PathBuf};

pub struct FieldlogApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> FieldlogApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Open or create a project; a no-op when it already exists.
    pub fn open_project(&mut self, project_code: &str) -> Result<commands::CmdResult> {
        commands::open::run(&mut self.store, project_code)
    }

    /// Append or update a run row, keyed by `(task_number, attempt_number)`.
    pub fn upsert_run(
        &mut self,
        project_code: &str,
        meta: &ProjectMeta,
        run: &RunData,
    ) -> Result<commands::CmdResult> {
        commands::upsert::run(&mut self.store, project_code, meta, run)
    }

    pub fn next_attempt(&self, project_code: &str, task_number: u32) -> Result<commands::CmdResult> {
        commands::attempt::run(&self.store, project_code, task_number)
    }

    pub fn list_projects(&self) -> Result<commands::CmdResult> {
        commands::list::projects(&self.store)
    }

    pub fn show_rows(&self, project_code: &str) -> Result<commands::CmdResult> {
        commands::list::rows(&self.store, project_code)
    }

    /// All rows of a project, for callers that want the data rather than a
    /// command result (e.g. pre-filling an edit).
    pub fn project_rows(&self, project_code: &str) -> Result<Vec<RunRecord>> {
        self.store.load_rows(project_code)
    }

    /// Look up a single row by its composite key. `None` is how callers
    /// enforce "must already exist" before an edit.
    pub fn find_run(
        &self,
        project_code: &str,
        task_number: &str,
        attempt_number: &str,
    ) -> Result<Option<RunRecord>> {
        Ok(self
            .store
            .load_rows(project_code)?
            .into_iter()
            .find(|row| row.matches(task_number, attempt_number)))
    }

    pub fn delete_last(&mut self, project_code: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, project_code)
    }

    pub fn clear_project(&mut self, project_code: &str) -> Result<commands::CmdResult> {
        commands::clear::table(&mut self.store, project_code)
    }

    pub fn clear_all(&mut self) -> Result<commands::CmdResult> {
        commands::clear::all(&mut self.store)
    }

    pub fn export(&self, project_code: &str, out: Option<&Path>) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, project_code, out)
    }

    pub fn resolve_folder(&self, project_code: &str) -> String {
        self.store.resolve_folder(project_code)
    }

    pub fn storage_root(&self) -> &Path {
        self.store.storage_root()
    }

    /// Relocate the storage root for the rest of this session. Existing data
    /// stays where it was.
    pub fn set_storage_root(&mut self, root: PathBuf) {
        self.store.set_storage_root(root);
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
