// Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use riseup::errors::PersistenceError;
use riseup::plan::{DayEntry, Plan};
use riseup::profile::{ProfilePatch, UserProfile};
use riseup::store::{DocumentStore, InMemoryStore};

/// In-memory store that counts writes and can be told to fail them.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    sets: AtomicUsize,
    updates: AtomicUsize,
    fail_writes: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::WriteFailed("store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, PersistenceError> {
        self.inner.get(user_id).await
    }

    async fn set(&self, user_id: &str, profile: &UserProfile) -> Result<(), PersistenceError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        self.inner.set(user_id, profile).await
    }

    async fn update(&self, user_id: &str, patch: &ProfilePatch) -> Result<(), PersistenceError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        self.inner.update(user_id, patch).await
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn task_text(day: usize, n: usize) -> String {
    format!("Day {day}: step {n}")
}

/// A 14 x 5 plan as the model would return it.
pub fn plan_value() -> Value {
    Value::Array(
        (1..=14)
            .map(|d| {
                json!({
                    "day": format!("Day {d}"),
                    "tasks": (1..=5).map(|n| task_text(d, n)).collect::<Vec<_>>(),
                })
            })
            .collect(),
    )
}

pub fn plan() -> Plan {
    let days: Vec<DayEntry> = serde_json::from_value(plan_value()).unwrap();
    Plan::try_from(days).unwrap()
}
