use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Pop the last row in file order, whatever its key. Distinguishes "nothing
/// to delete" from a successful removal.
pub fn run<S: DataStore>(store: &mut S, project_code: &str) -> Result<CmdResult> {
    let mut rows = store.load_rows(project_code)?;
    let mut result = CmdResult::default();

    match rows.pop() {
        Some(removed) => {
            store.write_rows(project_code, &rows)?;
            result.add_message(CmdMessage::warning(format!(
                "Deleted: Task {} Run {}.",
                removed.task_number, removed.attempt_number
            )));
            Ok(result.with_affected_rows(vec![removed]))
        }
        None => {
            result.add_message(CmdMessage::info("No entries to delete."));
            Ok(result)
        }
    }
}
