// Daily progress across sessions, day boundaries and store failures

mod common;

use chrono::{Duration, NaiveDate};
use std::sync::Arc;

use common::{at, plan, task_text, RecordingStore};
use riseup::clock::FixedClock;
use riseup::errors::ProgressError;
use riseup::profile::{QuestionnaireRecord, UserProfile};
use riseup::progress::{ProgressEngine, ToggleOutcome};
use riseup::questionnaire::AgeGroup;
use riseup::store::{DocumentStore, SqliteStore};

/// Plan generated 2026-06-01 06:00 UTC.
fn planned_profile() -> UserProfile {
    let created = at(2026, 6, 1, 6);
    UserProfile::register("dev", "Dev", "", 30, created).with_plan(
        plan(),
        QuestionnaireRecord {
            answers: vec!["Often".to_string(); 10],
            problem: "Too much screen time".to_string(),
            age_group: AgeGroup::Adult,
            age: 30,
            generated_at: created,
        },
    )
}

async fn seeded() -> Arc<RecordingStore> {
    let store = Arc::new(RecordingStore::new());
    store.set("dev", &planned_profile()).await.unwrap();
    store
}

async fn complete_all(engine: &mut ProgressEngine, day: usize) -> Vec<ToggleOutcome> {
    let mut outcomes = Vec::new();
    for n in 1..=5 {
        outcomes.push(engine.toggle_task(&task_text(day, n)).await.unwrap());
    }
    outcomes
}

#[tokio::test]
async fn test_third_day_three_tasks() {
    let store = seeded().await;
    let clock = Arc::new(FixedClock::new(at(2026, 6, 3, 12)));
    let mut engine = ProgressEngine::load(store.clone(), clock, "dev").await.unwrap();

    assert_eq!(engine.day_index(), 2);
    for n in 1..=3 {
        let outcome = engine.toggle_task(&task_text(3, n)).await.unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Completed {
                coins_awarded: 1,
                day_completed: false,
                streak_awarded: false
            }
        );
    }

    assert_eq!(engine.coins(), 3);
    assert_eq!(engine.streak(), 0);
    assert_eq!(store.updates(), 3, "one merge-write per toggle");

    let doc = store.get("dev").await.unwrap().unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 6, 3).unwrap();
    let record = doc.progress_for(today, 2).unwrap();
    assert_eq!(record.completed_tasks.len(), 3);
    assert!(!record.quota_met);
    assert_eq!(doc.coins, 3);
}

#[tokio::test]
async fn test_retract_keeps_coins() {
    let store = seeded().await;
    let clock = Arc::new(FixedClock::new(at(2026, 6, 1, 9)));
    let mut engine = ProgressEngine::load(store.clone(), clock, "dev").await.unwrap();

    engine.toggle_task(&task_text(1, 1)).await.unwrap();
    engine.toggle_task(&task_text(1, 2)).await.unwrap();
    let outcome = engine.toggle_task(&task_text(1, 2)).await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Retracted);
    assert_eq!(engine.completed_tasks().to_vec(), vec![task_text(1, 1)]);
    assert_eq!(engine.coins(), 2);
    assert_eq!(engine.next_task(), Some(task_text(1, 2).as_str()));

    // Completing it again awards another coin.
    engine.toggle_task(&task_text(1, 2)).await.unwrap();
    assert_eq!(engine.coins(), 3);
}

#[tokio::test]
async fn test_streak_counts_once_per_date() {
    let store = seeded().await;
    let clock = Arc::new(FixedClock::new(at(2026, 6, 1, 10)));
    let mut engine = ProgressEngine::load(store.clone(), clock, "dev").await.unwrap();

    let outcomes = complete_all(&mut engine, 1).await;
    assert_eq!(
        outcomes[4],
        ToggleOutcome::Completed {
            coins_awarded: 1,
            day_completed: true,
            streak_awarded: true
        }
    );
    assert_eq!(engine.streak(), 1);
    assert!(engine.dashboard().quota_met);

    // Undo the fifth task and finish it again on the same date.
    engine.toggle_task(&task_text(1, 5)).await.unwrap();
    assert!(!engine.dashboard().quota_met);
    let again = engine.toggle_task(&task_text(1, 5)).await.unwrap();
    assert_eq!(
        again,
        ToggleOutcome::Completed {
            coins_awarded: 1,
            day_completed: true,
            streak_awarded: false
        }
    );
    assert_eq!(engine.streak(), 1);
    assert_eq!(engine.coins(), 6);

    let doc = store.get("dev").await.unwrap().unwrap();
    assert_eq!(doc.streak, 1);
    assert_eq!(
        doc.last_completion_date,
        NaiveDate::from_ymd_opt(2026, 6, 1)
    );
}

#[tokio::test]
async fn test_reload_same_day_keeps_partial_progress() {
    let store = seeded().await;
    let clock = Arc::new(FixedClock::new(at(2026, 6, 2, 7)));
    {
        let mut engine = ProgressEngine::load(store.clone(), clock.clone(), "dev")
            .await
            .unwrap();
        engine.toggle_task(&task_text(2, 1)).await.unwrap();
        engine.toggle_task(&task_text(2, 2)).await.unwrap();
    }

    clock.advance(Duration::hours(3));
    let engine = ProgressEngine::load(store.clone(), clock, "dev").await.unwrap();
    assert_eq!(engine.completed_tasks().len(), 2);
    assert_eq!(engine.next_task(), Some(task_text(2, 3).as_str()));
}

#[tokio::test]
async fn test_next_day_starts_fresh_and_keeps_history() {
    let store = seeded().await;
    let clock = Arc::new(FixedClock::new(at(2026, 6, 1, 20)));
    let mut engine = ProgressEngine::load(store.clone(), clock.clone(), "dev")
        .await
        .unwrap();
    complete_all(&mut engine, 1).await;

    clock.set(at(2026, 6, 2, 8));
    let mut engine = ProgressEngine::load(store.clone(), clock.clone(), "dev")
        .await
        .unwrap();
    assert_eq!(engine.day_index(), 1);
    assert!(engine.completed_tasks().is_empty());
    assert_eq!(engine.streak(), 1);

    complete_all(&mut engine, 2).await;
    assert_eq!(engine.streak(), 2);
    assert_eq!(engine.coins(), 10);

    let doc = store.get("dev").await.unwrap().unwrap();
    assert_eq!(doc.progress.len(), 2);
    assert!(doc.progress.iter().all(|r| r.quota_met));
}

#[tokio::test]
async fn test_plan_day_change_within_a_date_keeps_finished_record() {
    // Plan created in the evening: plan day 2 starts at 18:00 on the next date.
    let created = at(2026, 6, 1, 18);
    let mut profile = planned_profile();
    if let Some(q) = profile.questionnaire.as_mut() {
        q.generated_at = created;
    }
    let store = Arc::new(RecordingStore::new());
    store.set("dev", &profile).await.unwrap();

    let clock = Arc::new(FixedClock::new(at(2026, 6, 2, 10)));
    let mut engine = ProgressEngine::load(store.clone(), clock.clone(), "dev")
        .await
        .unwrap();
    assert_eq!(engine.day_index(), 0);
    complete_all(&mut engine, 1).await;

    clock.set(at(2026, 6, 2, 19));
    engine.toggle_task(&task_text(2, 1)).await.unwrap();
    assert_eq!(engine.day_index(), 1);

    let doc = store.get("dev").await.unwrap().unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 6, 2).unwrap();
    assert_eq!(doc.progress.len(), 2);

    let finished = doc.progress_for(date, 0).unwrap();
    assert_eq!(finished.completed_tasks.len(), 5);
    assert!(finished.quota_met);

    let current = doc.progress_for(date, 1).unwrap();
    assert_eq!(current.completed_tasks, vec![task_text(2, 1)]);
    assert!(!current.quota_met);

    // A fresh session on the same date resumes plan day 2, not day 1.
    let reloaded = ProgressEngine::load(store.clone(), clock, "dev").await.unwrap();
    assert_eq!(reloaded.completed_tasks().len(), 1);
    assert_eq!(reloaded.next_task(), Some(task_text(2, 2).as_str()));
}

#[tokio::test]
async fn test_skipped_day_does_not_reset_streak() {
    let store = seeded().await;
    let clock = Arc::new(FixedClock::new(at(2026, 6, 1, 12)));
    let mut engine = ProgressEngine::load(store.clone(), clock.clone(), "dev")
        .await
        .unwrap();
    complete_all(&mut engine, 1).await;

    clock.set(at(2026, 6, 4, 12));
    let mut engine = ProgressEngine::load(store.clone(), clock, "dev").await.unwrap();
    assert_eq!(engine.day_index(), 3);
    complete_all(&mut engine, 4).await;
    assert_eq!(engine.streak(), 2);
}

#[tokio::test]
async fn test_out_of_order_toggle_writes_nothing() {
    let store = seeded().await;
    let clock = Arc::new(FixedClock::new(at(2026, 6, 1, 12)));
    let mut engine = ProgressEngine::load(store.clone(), clock, "dev").await.unwrap();

    let err = engine.toggle_task(&task_text(1, 3)).await.unwrap_err();
    assert!(matches!(err, ProgressError::NotNextTask { .. }));
    assert_eq!(store.updates(), 0);
}

#[tokio::test]
async fn test_write_failure_keeps_in_memory_state() {
    let store = seeded().await;
    let clock = Arc::new(FixedClock::new(at(2026, 6, 1, 12)));
    let mut engine = ProgressEngine::load(store.clone(), clock.clone(), "dev")
        .await
        .unwrap();

    store.fail_writes(true);
    engine.toggle_task(&task_text(1, 1)).await.unwrap();
    engine.toggle_task(&task_text(1, 2)).await.unwrap();
    assert_eq!(engine.coins(), 2);
    assert_eq!(engine.completed_tasks().len(), 2);
    assert_eq!(store.updates(), 2);

    // The document never saw the writes, so a fresh session starts over.
    store.fail_writes(false);
    let reloaded = ProgressEngine::load(store.clone(), clock, "dev").await.unwrap();
    assert_eq!(reloaded.coins(), 0);
    assert!(reloaded.completed_tasks().is_empty());
}

#[tokio::test]
async fn test_progress_survives_sqlite_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("riseup.db");
    let clock = Arc::new(FixedClock::new(at(2026, 6, 5, 9)));

    {
        let store = Arc::new(SqliteStore::open(&path)?);
        store.set("dev", &planned_profile()).await?;
        let mut engine = ProgressEngine::load(store, clock.clone(), "dev").await?;
        complete_all(&mut engine, 5).await;
    }

    let store = Arc::new(SqliteStore::open(&path)?);
    let engine = ProgressEngine::load(store, clock, "dev").await?;
    assert_eq!(engine.completed_tasks().len(), 5);
    assert_eq!(engine.streak(), 1);
    assert_eq!(engine.coins(), 5);
    assert!(engine.dashboard().tasks.iter().all(|t| t.completed && !t.clickable));
    Ok(())
}
