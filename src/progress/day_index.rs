// Day Index Calculator

use chrono::{DateTime, Utc};

use crate::config::constants::PLAN_DAYS;

/// Active plan day (0-based): whole days elapsed since plan creation, clamped to
/// `0..=13`. Times before creation map to day 0.
pub fn day_index(plan_created_at: DateTime<Utc>, now: DateTime<Utc>) -> usize {
    let elapsed = (now - plan_created_at).num_days();
    elapsed.clamp(0, PLAN_DAYS as i64 - 1) as usize
}
