use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FieldlogError, Result};
use crate::store::{DataStore, OpenStatus};

/// Ensure the project's dated folder and headered table exist. Reopening an
/// existing project leaves the table untouched.
pub fn run<S: DataStore>(store: &mut S, project_code: &str) -> Result<CmdResult> {
    if project_code.trim().is_empty() {
        return Err(FieldlogError::Api("Project code cannot be empty".into()));
    }

    let folder = store.resolve_folder(project_code);
    let status = store.ensure_table(project_code)?;

    let mut result = CmdResult::default();
    match status {
        OpenStatus::Created => result.add_message(CmdMessage::success(format!(
            "Project '{}' created at {}",
            project_code, folder
        ))),
        OpenStatus::Existed => result.add_message(CmdMessage::info(format!(
            "Project '{}' opened at {}",
            project_code, folder
        ))),
    }
    Ok(result)
}
