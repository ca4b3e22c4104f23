use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FieldlogError, Result};
use crate::store::DataStore;
use std::fs;
use std::path::Path;

/// Serialize the project's table to wire-format bytes, header-only if the
/// project was never written. With `out` set the bytes are written to that
/// file; otherwise they ride back on the result for the caller to stream.
pub fn run<S: DataStore>(
    store: &S,
    project_code: &str,
    out: Option<&Path>,
) -> Result<CmdResult> {
    let bytes = store.export_bytes(project_code)?;
    let mut result = CmdResult::default();

    match out {
        Some(path) => {
            fs::write(path, &bytes).map_err(FieldlogError::Io)?;
            result.add_message(CmdMessage::success(format!(
                "Exported {} to {}",
                project_code,
                path.display()
            )));
        }
        None => {
            result = result.with_exported(bytes);
        }
    }
    Ok(result)
}
