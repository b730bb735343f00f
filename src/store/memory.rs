// In-process document store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::errors::PersistenceError;
use crate::profile::{ProfilePatch, UserProfile};

/// Documents held in a map; used for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    docs: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, PersistenceError> {
        Ok(self.docs.read().await.get(user_id).cloned())
    }

    async fn set(&self, user_id: &str, profile: &UserProfile) -> Result<(), PersistenceError> {
        self.docs
            .write()
            .await
            .insert(user_id.to_string(), profile.clone());
        Ok(())
    }

    async fn update(&self, user_id: &str, patch: &ProfilePatch) -> Result<(), PersistenceError> {
        let mut docs = self.docs.write().await;
        let doc = docs
            .get_mut(user_id)
            .ok_or_else(|| PersistenceError::WriteFailed(format!("no document for user {user_id}")))?;
        patch.apply_to(doc);
        Ok(())
    }
}
