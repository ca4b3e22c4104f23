use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Distinct project codes found under the storage root.
pub fn projects<S: DataStore>(store: &S) -> Result<CmdResult> {
    let codes = store.list_projects()?;
    let mut result = CmdResult::default();
    if codes.is_empty() {
        result.add_message(CmdMessage::info("No projects found."));
    }
    Ok(result.with_projects(codes))
}

/// All rows of a project, in file order. An unopened project lists as empty.
pub fn rows<S: DataStore>(store: &S, project_code: &str) -> Result<CmdResult> {
    let rows = store.load_rows(project_code)?;
    let mut result = CmdResult::default();
    if rows.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No entries yet for project '{}'.",
            project_code
        )));
    }
    Ok(result.with_listed_rows(rows))
}
