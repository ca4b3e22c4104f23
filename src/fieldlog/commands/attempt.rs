use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// `max(attempt_number) + 1` over the task's rows, or 1 when the task (or
/// the whole project) has no rows yet. Non-numeric attempt values are
/// skipped, not treated as errors.
pub fn next_attempt_number<S: DataStore>(
    store: &S,
    project_code: &str,
    task_number: u32,
) -> Result<u32> {
    let task = task_number.to_string();
    let max_attempt = store
        .load_rows(project_code)?
        .iter()
        .filter(|row| row.task_number == task)
        .filter_map(|row| row.attempt_number.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    Ok(max_attempt + 1)
}

pub fn run<S: DataStore>(store: &S, project_code: &str, task_number: u32) -> Result<CmdResult> {
    let next = next_attempt_number(store, project_code, task_number)?;
    let mut result = CmdResult::default().with_next_attempt(next);
    result.add_message(CmdMessage::info(format!(
        "Next attempt for task {}: {}",
        task_number, next
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::upsert;
    use crate::model::{ProjectMeta, RunData};
    use crate::store::memory::InMemoryStore;

    fn add(store: &mut InMemoryStore, task: &str, attempt: &str) {
        let data = RunData {
            task_number: task.to_string(),
            attempt_number: attempt.to_string(),
            ..Default::default()
        };
        upsert::run(store, "P1", &ProjectMeta::default(), &data).unwrap();
    }

    #[test]
    fn returns_max_plus_one_per_task() {
        let mut store = InMemoryStore::new();
        add(&mut store, "2", "1");
        add(&mut store, "2", "3");
        add(&mut store, "1", "5");

        assert_eq!(next_attempt_number(&store, "P1", 2).unwrap(), 4);
        assert_eq!(next_attempt_number(&store, "P1", 1).unwrap(), 6);
    }

    #[test]
    fn returns_one_for_unseen_task_or_project() {
        let mut store = InMemoryStore::new();
        add(&mut store, "2", "1");
        assert_eq!(next_attempt_number(&store, "P1", 9).unwrap(), 1);
        assert_eq!(next_attempt_number(&store, "NOPE", 1).unwrap(), 1);
    }

    #[test]
    fn skips_non_numeric_attempts() {
        let mut store = InMemoryStore::new();
        add(&mut store, "2", "junk");
        add(&mut store, "2", "2");
        assert_eq!(next_attempt_number(&store, "P1", 2).unwrap(), 3);
    }
}
