// Progress State Machine
//
// One engine per user session. Transitions take `&mut self`, so each toggle sees
// the in-memory result of the previous one. Writes are optimistic: a failed store
// write is logged and the in-memory state stays authoritative for the session.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::day_index::day_index;
use super::reconcile::{reconcile, WorkingState};
use crate::clock::Clock;
use crate::config::constants::{COINS_PER_TASK, MAX_STREAK, TASKS_PER_DAY};
use crate::errors::ProgressError;
use crate::plan::{DayEntry, Plan};
use crate::profile::{ProfilePatch, UserProfile};
use crate::store::DocumentStore;

/// Result of a successful `toggle_task`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The next gated task was marked done.
    Completed {
        coins_awarded: u64,
        /// All five of today's tasks are now done
        day_completed: bool,
        /// This completion advanced the streak (at most once per calendar date)
        streak_awarded: bool,
    },
    /// The most recent completion was undone. Coins are not taken back.
    Retracted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub text: String,
    pub completed: bool,
    /// Only the next gated task can be completed
    pub clickable: bool,
}

/// What the dashboard shows for the active day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// 1-based plan day
    pub day_number: usize,
    pub day_label: String,
    pub tasks: Vec<TaskView>,
    pub streak: u32,
    pub coins: u64,
    pub quota_met: bool,
    pub plan_complete: bool,
}

pub struct ProgressEngine {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    profile: UserProfile,
    plan: Plan,
    working: WorkingState,
}

impl ProgressEngine {
    /// Start a session by reading the user's document.
    pub async fn load(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        user_id: &str,
    ) -> Result<Self, ProgressError> {
        let profile = store
            .get(user_id)
            .await?
            .ok_or_else(|| ProgressError::UserNotFound(user_id.to_string()))?;
        Self::from_profile(store, clock, profile)
    }

    /// Start a session from a document already in hand (e.g. straight after
    /// plan generation).
    pub fn from_profile(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        profile: UserProfile,
    ) -> Result<Self, ProgressError> {
        let plan = profile.plan.clone().ok_or(ProgressError::NoPlan)?;
        let working = Self::working_state_for(&profile, &plan, clock.as_ref());

        tracing::debug!(
            "Progress session for {}: day {} with {}/{} tasks done",
            profile.id,
            working.day_index + 1,
            working.completed_tasks.len(),
            TASKS_PER_DAY
        );

        Ok(Self {
            store,
            clock,
            profile,
            plan,
            working,
        })
    }

    fn working_state_for(profile: &UserProfile, plan: &Plan, clock: &dyn Clock) -> WorkingState {
        let today = clock.today();
        let index = profile
            .plan_created_at()
            .map(|created| day_index(created, clock.now()))
            .unwrap_or(0);
        reconcile(
            profile.progress_for(today, index),
            today,
            index,
            &plan.day(index).tasks,
        )
    }

    /// Re-run rollover if the calendar date or the plan day moved on since the
    /// working set was built. Returns true when the working set was replaced.
    pub fn sync_day(&mut self) -> bool {
        let fresh = Self::working_state_for(&self.profile, &self.plan, self.clock.as_ref());
        if fresh.date == self.working.date && fresh.day_index == self.working.day_index {
            return false;
        }
        tracing::info!(
            "Day rolled over for {}: {} (day {}) -> {} (day {})",
            self.profile.id,
            self.working.date,
            self.working.day_index + 1,
            fresh.date,
            fresh.day_index + 1
        );
        self.working = fresh;
        true
    }

    /// Complete the next gated task, or retract the most recent completion.
    ///
    /// Completing awards one coin and, when it finishes the day, advances the streak
    /// once per calendar date. Everything a transition changes is sent as one
    /// merge-write.
    pub async fn toggle_task(&mut self, task: &str) -> Result<ToggleOutcome, ProgressError> {
        self.sync_day();

        let today_tasks = &self.plan.day(self.working.day_index).tasks;
        if !today_tasks.iter().any(|t| t == task) {
            return Err(ProgressError::UnknownTask(task.to_string()));
        }

        if self.working.completed_tasks.iter().any(|t| t == task) {
            if self.working.completed_tasks.last().map(String::as_str) != Some(task) {
                return Err(ProgressError::NotLastCompleted {
                    task: task.to_string(),
                });
            }
            self.working.completed_tasks.pop();
            self.working.quota_met = false;

            tracing::info!("{} retracted '{}'", self.profile.id, task);
            let patch = ProfilePatch {
                progress: Some(self.working.clone()),
                ..Default::default()
            };
            self.commit(patch).await;
            return Ok(ToggleOutcome::Retracted);
        }

        let expected = &today_tasks[self.working.completed_tasks.len()];
        if expected != task {
            return Err(ProgressError::NotNextTask {
                task: task.to_string(),
                expected: expected.clone(),
            });
        }

        self.working.completed_tasks.push(task.to_string());
        let day_completed = self.working.completed_tasks.len() == TASKS_PER_DAY;
        self.working.quota_met = day_completed;

        let mut patch = ProfilePatch {
            progress: Some(self.working.clone()),
            coins: Some(self.profile.coins + COINS_PER_TASK),
            ..Default::default()
        };

        let today = self.working.date;
        let streak_awarded = day_completed && self.profile.last_completion_date != Some(today);
        if streak_awarded {
            let streak = (self.profile.streak + 1).min(MAX_STREAK);
            patch.streak = Some(streak);
            patch.last_completion_date = Some(today);
            tracing::info!(
                "{} completed day {} on {}: streak {}",
                self.profile.id,
                self.working.day_index + 1,
                today,
                streak
            );
        } else if day_completed {
            tracing::debug!("{} re-completed {}; streak already counted", self.profile.id, today);
        }

        self.commit(patch).await;

        Ok(ToggleOutcome::Completed {
            coins_awarded: COINS_PER_TASK,
            day_completed,
            streak_awarded,
        })
    }

    /// Apply a patch in memory, then persist it. Store failures are logged only.
    async fn commit(&mut self, patch: ProfilePatch) {
        patch.apply_to(&mut self.profile);
        if let Err(e) = self.store.update(&self.profile.id, &patch).await {
            tracing::warn!(
                "Failed to sync {:?} for {}: {}; in-memory progress may diverge on reload",
                patch.fields(),
                self.profile.id,
                e
            );
        }
    }

    pub fn dashboard(&self) -> DashboardView {
        let entry = self.today();
        let done = self.working.completed_tasks.len();
        let tasks = entry
            .tasks
            .iter()
            .enumerate()
            .map(|(i, text)| TaskView {
                text: text.clone(),
                completed: i < done,
                clickable: i == done,
            })
            .collect();

        DashboardView {
            day_number: self.working.day_index + 1,
            day_label: entry.day.clone(),
            tasks,
            streak: self.profile.streak,
            coins: self.profile.coins,
            quota_met: self.working.quota_met,
            plan_complete: self.is_plan_complete(),
        }
    }

    /// The active day's plan entry
    pub fn today(&self) -> &DayEntry {
        self.plan.day(self.working.day_index)
    }

    pub fn day_index(&self) -> usize {
        self.working.day_index
    }

    pub fn date(&self) -> NaiveDate {
        self.working.date
    }

    pub fn completed_tasks(&self) -> &[String] {
        &self.working.completed_tasks
    }

    /// The task that can be completed next, if any remain today
    pub fn next_task(&self) -> Option<&str> {
        self.today()
            .tasks
            .get(self.working.completed_tasks.len())
            .map(String::as_str)
    }

    pub fn streak(&self) -> u32 {
        self.profile.streak
    }

    pub fn coins(&self) -> u64 {
        self.profile.coins
    }

    /// Streak has reached the plan length. Resetting the plan is left to the caller.
    pub fn is_plan_complete(&self) -> bool {
        self.profile.streak >= MAX_STREAK
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }
}
