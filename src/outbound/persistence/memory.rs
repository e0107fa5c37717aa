//! In-memory document store backing the user repository port.
//!
//! One document per aggregate, replaced wholesale on save. Two requests that
//! load the same owner, mutate different items, and save will resolve
//! last-writer-wins over the entire aggregate; that race is accepted and no
//! optimistic-locking token is carried.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{NewUser, User, UserId};

/// Repository adapter over an in-process document collection.
///
/// Cloning shares the underlying store, so every worker sees the same data.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    // Creation order doubles as display order; collection sizes are small
    // enough that identity lookups scan linearly.
    documents: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforce the embedded schema before anything is written: a blank item
    /// name rejects the whole save.
    fn check_embedded_schema(user: &User) -> Result<(), UserPersistenceError> {
        if let Some(item) = user.pantry().first_invalid() {
            return Err(UserPersistenceError::Validation {
                field: format!("pantry.{}.name", item.id()),
                message: "name is required".to_owned(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, UserPersistenceError> {
        let user = User::new(UserId::random(), new_user.username, new_user.password_hash);
        let mut documents = self.documents.write().await;
        documents.push(user.clone());
        Ok(user)
    }

    async fn load(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or(UserPersistenceError::NotFound { id: *id })
    }

    async fn load_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.documents.read().await.clone())
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        Self::check_embedded_schema(user)?;
        let mut documents = self.documents.write().await;
        let slot = documents
            .iter_mut()
            .find(|stored| stored.id() == user.id())
            .ok_or(UserPersistenceError::NotFound { id: *user.id() })?;
        *slot = user.clone();
        Ok(())
    }
}
