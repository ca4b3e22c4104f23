use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FieldlogError, Result};
use crate::model::{ProjectMeta, RunData, RunRecord};
use crate::store::DataStore;

/// The single mutation entrypoint for run rows. Matches by
/// `(task_number, attempt_number)`:
/// - match found → update run fields unconditionally, fill blanks from meta
/// - no match → append a fresh row built from defaults, meta, then run
///
/// Safe to call whether or not the table exists; re-invoking with the same
/// key is always idempotent. Callers wanting "must already exist" semantics
/// query the table first; the store never refuses an update intent.
pub fn run<S: DataStore>(
    store: &mut S,
    project_code: &str,
    meta: &ProjectMeta,
    run_data: &RunData,
) -> Result<CmdResult> {
    if project_code.trim().is_empty() {
        return Err(FieldlogError::Api("Project code cannot be empty".into()));
    }

    let task = run_data.task_number.as_str();
    let attempt = run_data.attempt_number.as_str();
    let mut rows = store.load_rows(project_code)?;
    let mut result = CmdResult::default();

    if let Some(row) = rows.iter_mut().find(|r| r.matches(task, attempt)) {
        row.apply_update(meta, run_data);
        let updated = row.clone();
        store.write_rows(project_code, &rows)?;
        result.add_message(CmdMessage::success(format!(
            "Task {} run {}: updated.",
            task, attempt
        )));
        return Ok(result.with_affected_rows(vec![updated]));
    }

    let record = RunRecord::from_parts(project_code, meta, run_data);
    rows.push(record.clone());
    store.write_rows(project_code, &rows)?;
    result.add_message(CmdMessage::success(format!(
        "Task {} run {}: added.",
        task, attempt
    )));
    Ok(result.with_affected_rows(vec![record]))
}
