// User profile document and the partial updates applied to it
//
// One document per user. Plan generation writes the whole document once; the
// progress engine only ever sends `ProfilePatch` merge-writes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::Plan;
use crate::questionnaire::AgeGroup;

/// Completed tasks for one calendar date, in completion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub date: NaiveDate,
    /// Plan day (0-based) whose tasks `completed_tasks` refers to
    #[serde(default)]
    pub day_index: usize,
    #[serde(default)]
    pub completed_tasks: Vec<String>,
    /// All five of the day's tasks are currently completed
    #[serde(default)]
    pub quota_met: bool,
}

impl ProgressRecord {
    pub fn empty(date: NaiveDate, day_index: usize) -> Self {
        Self {
            date,
            day_index,
            completed_tasks: Vec::new(),
            quota_met: false,
        }
    }
}

/// Questionnaire inputs stored next to the plan they produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireRecord {
    pub answers: Vec<String>,
    pub problem: String,
    pub age_group: AgeGroup,
    pub age: u32,
    /// Plan creation time; day 1 starts here
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub age: u32,
    pub age_group: AgeGroup,
    pub created_at: DateTime<Utc>,

    /// Days on which all five tasks were completed, capped at 14
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub coins: u64,
    #[serde(default)]
    pub last_completion_date: Option<NaiveDate>,

    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub questionnaire: Option<QuestionnaireRecord>,

    /// Progress history, one record per (date, plan day), oldest first
    #[serde(default)]
    pub progress: Vec<ProgressRecord>,
}

impl UserProfile {
    /// Fresh profile for a newly registered user.
    pub fn register(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        age: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            age,
            age_group: AgeGroup::from_age(age),
            created_at: now,
            streak: 0,
            coins: 0,
            last_completion_date: None,
            plan: None,
            questionnaire: None,
            progress: Vec::new(),
        }
    }

    /// When the current plan was generated. Falls back to account creation for
    /// documents that carry a plan without a questionnaire record.
    pub fn plan_created_at(&self) -> Option<DateTime<Utc>> {
        self.plan.as_ref()?;
        Some(
            self.questionnaire
                .as_ref()
                .map(|q| q.generated_at)
                .unwrap_or(self.created_at),
        )
    }

    /// Record for `date` on plan day `day_index`, if one was written.
    pub fn progress_for(&self, date: NaiveDate, day_index: usize) -> Option<&ProgressRecord> {
        self.progress
            .iter()
            .find(|r| r.date == date && r.day_index == day_index)
    }

    /// Replace the record with the same date and plan day, or append a new one.
    /// Records for other days are never touched.
    pub fn record_progress(&mut self, record: ProgressRecord) {
        match self
            .progress
            .iter_mut()
            .find(|r| r.date == record.date && r.day_index == record.day_index)
        {
            Some(existing) => *existing = record,
            None => {
                self.progress.push(record);
                self.progress.sort_by_key(|r| (r.date, r.day_index));
            }
        }
    }

    /// Copy of this profile carrying a newly generated plan.
    pub fn with_plan(&self, plan: Plan, questionnaire: QuestionnaireRecord) -> Self {
        Self {
            plan: Some(plan),
            questionnaire: Some(questionnaire),
            ..self.clone()
        }
    }
}

/// Merge-write of the fields the progress engine owns. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    /// Replaces the record with the same date and plan day; other records are untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coins: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completion_date: Option<NaiveDate>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.progress.is_none()
            && self.coins.is_none()
            && self.streak.is_none()
            && self.last_completion_date.is_none()
    }

    /// Names of the fields this patch writes (for logs).
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.progress.is_some() {
            fields.push("progress");
        }
        if self.coins.is_some() {
            fields.push("coins");
        }
        if self.streak.is_some() {
            fields.push("streak");
        }
        if self.last_completion_date.is_some() {
            fields.push("last_completion_date");
        }
        fields
    }

    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(record) = &self.progress {
            profile.record_progress(record.clone());
        }
        if let Some(coins) = self.coins {
            profile.coins = coins;
        }
        if let Some(streak) = self.streak {
            profile.streak = streak;
        }
        if let Some(date) = self.last_completion_date {
            profile.last_completion_date = Some(date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile::register(
            "u1",
            "Asha",
            "asha@example.com",
            19,
            Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_register_defaults() {
        let p = profile();
        assert_eq!(p.age_group, AgeGroup::YoungAdult);
        assert_eq!(p.streak, 0);
        assert_eq!(p.coins, 0);
        assert!(p.plan.is_none());
        assert!(p.plan_created_at().is_none());
        assert!(p.progress.is_empty());
    }

    #[test]
    fn test_patch_merges_only_its_date() {
        let mut p = profile();
        let mut old = ProgressRecord::empty(date(2), 1);
        old.completed_tasks.push("walk".into());
        p.record_progress(old.clone());

        let patch = ProfilePatch {
            progress: Some(ProgressRecord::empty(date(3), 2)),
            coins: Some(4),
            ..Default::default()
        };
        patch.apply_to(&mut p);

        assert_eq!(p.progress.len(), 2);
        assert_eq!(p.progress_for(date(2), 1), Some(&old));
        assert_eq!(p.coins, 4);
        assert_eq!(p.streak, 0, "unset fields are untouched");
    }

    #[test]
    fn test_same_date_new_plan_day_keeps_earlier_record() {
        let mut p = profile();
        let mut finished = ProgressRecord::empty(date(2), 0);
        finished.completed_tasks = vec!["a".into(), "b".into()];
        finished.quota_met = true;
        p.record_progress(finished.clone());

        let mut next = ProgressRecord::empty(date(2), 1);
        next.completed_tasks.push("c".into());
        p.record_progress(next.clone());

        assert_eq!(p.progress.len(), 2);
        assert_eq!(p.progress_for(date(2), 0), Some(&finished));
        assert_eq!(p.progress_for(date(2), 1), Some(&next));

        next.completed_tasks.clear();
        p.record_progress(next.clone());
        assert_eq!(p.progress.len(), 2);
        assert_eq!(p.progress_for(date(2), 1), Some(&next));
    }

    #[test]
    fn test_patch_fields_and_empty() {
        assert!(ProfilePatch::default().is_empty());
        let patch = ProfilePatch {
            streak: Some(1),
            last_completion_date: Some(date(1)),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(patch.fields(), vec!["streak", "last_completion_date"]);
    }

    #[test]
    fn test_document_roundtrip_with_date_keys() {
        let mut p = profile();
        p.record_progress(ProgressRecord::empty(date(7), 6));
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"2026-05-07\""));
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_sparse_document_fills_defaults() {
        let json = r#"{"id":"u9","age":30,"age_group":"25+","created_at":"2026-01-01T00:00:00Z"}"#;
        let p: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.age_group, AgeGroup::Adult);
        assert_eq!(p.coins, 0);
        assert!(p.last_completion_date.is_none());
    }
}
