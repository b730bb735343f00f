// Plan types

use serde::{Deserialize, Serialize};

use crate::config::constants::{PLAN_DAYS, TASKS_PER_DAY};
use crate::errors::SchemaError;

/// One day of the plan: a label and exactly five ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub day: String,
    pub tasks: Vec<String>,
}

/// A validated plan of exactly 14 days.
///
/// Serialises as the bare JSON array the model returns. Deserialisation re-checks
/// the day and task counts, so a stored document cannot produce a malformed plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DayEntry>", into = "Vec<DayEntry>")]
pub struct Plan {
    days: Vec<DayEntry>,
}

impl Plan {
    pub fn days(&self) -> &[DayEntry] {
        &self.days
    }

    /// Day entry at a 0-based index, clamped to the last day.
    pub fn day(&self, index: usize) -> &DayEntry {
        &self.days[index.min(self.days.len() - 1)]
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl TryFrom<Vec<DayEntry>> for Plan {
    type Error = SchemaError;

    fn try_from(days: Vec<DayEntry>) -> Result<Self, Self::Error> {
        if days.len() != PLAN_DAYS {
            return Err(SchemaError::WrongLength {
                expected: PLAN_DAYS,
                actual: days.len(),
            });
        }
        for (i, entry) in days.iter().enumerate() {
            if entry.tasks.len() != TASKS_PER_DAY {
                return Err(SchemaError::WrongTaskCount {
                    day: i,
                    expected: TASKS_PER_DAY,
                    actual: entry.tasks.len(),
                });
            }
            for (j, task) in entry.tasks.iter().enumerate() {
                if entry.tasks[..j].contains(task) {
                    return Err(SchemaError::DuplicateTask {
                        day: i,
                        task: task.clone(),
                    });
                }
            }
        }
        Ok(Self { days })
    }
}

impl From<Plan> for Vec<DayEntry> {
    fn from(plan: Plan) -> Self {
        plan.days
    }
}

#[cfg(test)]
pub(crate) fn sample_days() -> Vec<DayEntry> {
    (1..=PLAN_DAYS)
        .map(|d| DayEntry {
            day: format!("Day {d}"),
            tasks: (1..=TASKS_PER_DAY)
                .map(|t| format!("Day {d} task {t}"))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_accepts_full_plan() {
        let plan = Plan::try_from(sample_days()).unwrap();
        assert_eq!(plan.len(), 14);
        assert_eq!(plan.day(0).day, "Day 1");
    }

    #[test]
    fn test_day_clamps_past_the_end() {
        let plan = Plan::try_from(sample_days()).unwrap();
        assert_eq!(plan.day(40).day, "Day 14");
    }

    #[test]
    fn test_try_from_rejects_duplicate_task() {
        let mut days = sample_days();
        days[2].tasks[4] = days[2].tasks[1].clone();
        assert_eq!(
            Plan::try_from(days).unwrap_err(),
            SchemaError::DuplicateTask {
                day: 2,
                task: "Day 3 task 2".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_rechecks_shape() {
        let mut days = sample_days();
        days.pop();
        let json = serde_json::to_string(&days).unwrap();
        assert!(serde_json::from_str::<Plan>(&json).is_err());
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let plan = Plan::try_from(sample_days()).unwrap();
        let value = serde_json::to_value(&plan).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["tasks"][0], "Day 1 task 1");
    }
}
