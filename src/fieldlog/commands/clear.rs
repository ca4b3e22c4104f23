use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Wipe all rows from the project's table, keeping the header.
pub fn table<S: DataStore>(store: &mut S, project_code: &str) -> Result<CmdResult> {
    let rows = store.load_rows(project_code)?;
    let mut result = CmdResult::default();

    if rows.is_empty() {
        result.add_message(CmdMessage::info("Table is already empty."));
        return Ok(result);
    }

    store.write_rows(project_code, &[])?;
    result.add_message(CmdMessage::success(format!(
        "Cleared {} row(s) from {}.",
        rows.len(),
        project_code
    )));
    Ok(result)
}

/// Delete every project folder under the storage root. Each removal is
/// attempted independently; failures are collected and reported, never
/// raised.
pub fn all<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let report = store.clear_all()?;
    let mut result = CmdResult::default();

    if !report.errors.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Cleared {} folder(s); errors: {}",
            report.removed,
            report.errors.join("; ")
        )));
    } else if report.removed == 0 {
        result.add_message(CmdMessage::info("No data to clear."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "All {} project folder(s) deleted.",
            report.removed
        )));
    }
    Ok(result)
}
