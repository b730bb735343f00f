// Document store boundary
//
// One document per user id. `set` overwrites the whole document; `update` merges a
// `ProfilePatch` into the stored document as a single write.

use async_trait::async_trait;

use crate::errors::PersistenceError;
use crate::profile::{ProfilePatch, UserProfile};

mod memory;
mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a user's document; `Ok(None)` when the user has none.
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, PersistenceError>;

    /// Replace the user's document.
    async fn set(&self, user_id: &str, profile: &UserProfile) -> Result<(), PersistenceError>;

    /// Merge `patch` into an existing document.
    async fn update(&self, user_id: &str, patch: &ProfilePatch) -> Result<(), PersistenceError>;
}
