// SQLite-backed document store
//
// Documents are stored as JSON text. A merge-write reads, patches and writes the
// document inside one transaction, so a patch never lands half-applied.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::DocumentStore;
use crate::errors::PersistenceError;
use crate::profile::{ProfilePatch, UserProfile};

pub struct SqliteStore {
    db: Arc<Mutex<Connection>>,
}

fn read_err(e: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::ReadFailed(e.to_string())
}

fn write_err(e: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::WriteFailed(e.to_string())
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        tracing::info!("Document store opened: {}", path.display());
        Self::with_connection(conn)
    }

    /// Private in-memory database
    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, PersistenceError> {
        let conn = self.db.lock().await;
        let document: Option<String> = conn
            .query_row(
                "SELECT document FROM user_documents WHERE id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(read_err)?;

        document
            .map(|json| serde_json::from_str(&json).map_err(read_err))
            .transpose()
    }

    async fn set(&self, user_id: &str, profile: &UserProfile) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(profile).map_err(write_err)?;
        let conn = self.db.lock().await;
        conn.execute(
            "INSERT INTO user_documents (id, document, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET document = excluded.document, updated_at = excluded.updated_at",
            params![user_id, json, now_millis()],
        )
        .map_err(write_err)?;

        tracing::debug!("Stored document for user {}", user_id);
        Ok(())
    }

    async fn update(&self, user_id: &str, patch: &ProfilePatch) -> Result<(), PersistenceError> {
        if patch.is_empty() {
            return Ok(());
        }
        let mut conn = self.db.lock().await;
        let tx = conn.transaction().map_err(write_err)?;

        let json: Option<String> = tx
            .query_row(
                "SELECT document FROM user_documents WHERE id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(read_err)?;
        let json =
            json.ok_or_else(|| PersistenceError::WriteFailed(format!("no document for user {user_id}")))?;

        let mut profile: UserProfile = serde_json::from_str(&json).map_err(read_err)?;
        patch.apply_to(&mut profile);
        let updated = serde_json::to_string(&profile).map_err(write_err)?;

        tx.execute(
            "UPDATE user_documents SET document = ?2, updated_at = ?3 WHERE id = ?1",
            params![user_id, updated, now_millis()],
        )
        .map_err(write_err)?;
        tx.commit().map_err(write_err)?;

        tracing::debug!("Updated {:?} for user {}", patch.fields(), user_id);
        Ok(())
    }
}
