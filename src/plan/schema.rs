// Plan Schema Validator
//
// Total over arbitrary JSON: every input yields either a `Plan` or the first
// violated rule as a `SchemaError`. Paths in errors use 0-based indices.

use serde_json::Value;

use super::types::{DayEntry, Plan};
use crate::config::constants::{PLAN_DAYS, TASKS_PER_DAY};
use crate::errors::SchemaError;

/// Check a parsed value against the plan shape and build a typed `Plan`.
///
/// A missing `day` label is filled with `Day N`; everything else is strict.
pub fn validate_plan(value: &Value) -> Result<Plan, SchemaError> {
    let entries = value.as_array().ok_or_else(|| SchemaError::WrongType {
        field: "plan".to_string(),
        expected: "array",
    })?;

    if entries.len() != PLAN_DAYS {
        return Err(SchemaError::WrongLength {
            expected: PLAN_DAYS,
            actual: entries.len(),
        });
    }

    let days = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| validate_day(i, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Plan::try_from(days)
}

fn validate_day(index: usize, entry: &Value) -> Result<DayEntry, SchemaError> {
    let path = format!("plan[{index}]");
    let object = entry.as_object().ok_or_else(|| SchemaError::WrongType {
        field: path.clone(),
        expected: "object",
    })?;

    let day = match object.get("day") {
        None | Some(Value::Null) => format!("Day {}", index + 1),
        Some(Value::String(label)) => label.clone(),
        Some(_) => {
            return Err(SchemaError::WrongType {
                field: format!("{path}.day"),
                expected: "string",
            })
        }
    };

    let tasks = match object.get("tasks") {
        None | Some(Value::Null) => {
            return Err(SchemaError::MissingField {
                field: format!("{path}.tasks"),
            })
        }
        Some(Value::Array(tasks)) => tasks,
        Some(_) => {
            return Err(SchemaError::WrongType {
                field: format!("{path}.tasks"),
                expected: "array",
            })
        }
    };

    if tasks.len() != TASKS_PER_DAY {
        return Err(SchemaError::WrongTaskCount {
            day: index,
            expected: TASKS_PER_DAY,
            actual: tasks.len(),
        });
    }

    let tasks = tasks
        .iter()
        .enumerate()
        .map(|(j, task)| {
            task.as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError::WrongType {
                    field: format!("{path}.tasks[{j}]"),
                    expected: "string",
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DayEntry { day, tasks })
}
