// Session-start rollover
//
// Today's working set is rebuilt from the persisted record only when that record
// belongs to today's date and today's plan day; otherwise the day starts empty.
// Stale records are never modified here.

use chrono::NaiveDate;

use crate::profile::ProgressRecord;

/// In-memory progress for the active day.
pub type WorkingState = ProgressRecord;

/// Build today's working set from the persisted record, if it still applies.
///
/// `tasks` is the active day's task list. A persisted record whose completions are
/// not a prefix of `tasks` is cut back to the longest valid prefix.
pub fn reconcile(
    persisted: Option<&ProgressRecord>,
    today: NaiveDate,
    day_index: usize,
    tasks: &[String],
) -> WorkingState {
    let record = match persisted {
        Some(record) if record.date == today && record.day_index == day_index => record,
        _ => return ProgressRecord::empty(today, day_index),
    };

    let completed: Vec<String> = record
        .completed_tasks
        .iter()
        .zip(tasks)
        .take_while(|(done, expected)| done == expected)
        .map(|(done, _)| done.clone())
        .collect();

    if completed.len() != record.completed_tasks.len() {
        tracing::warn!(
            "Persisted progress for {} is out of plan order; keeping {} of {} tasks",
            today,
            completed.len(),
            record.completed_tasks.len()
        );
    }

    ProgressRecord {
        date: today,
        day_index,
        quota_met: completed.len() == tasks.len(),
        completed_tasks: completed,
    }
}
