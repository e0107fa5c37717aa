//! Ports connecting the domain to persistence adapters.
//!
//! The repository is the sole persistence access point: handlers obtain an
//! aggregate via `load`, mutate it in memory, and hand the whole document
//! back to `save`. There is no partial save of the embedded collection.

use async_trait::async_trait;

use crate::domain::user::{NewUser, User, UserId};

/// Failures raised by user repository adapters, in the order handlers meet
/// them: the owner is missing, the saved document violates the embedded
/// schema, or the store itself misbehaved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// No aggregate carries the requested identity.
    #[error("user {id} not found")]
    NotFound { id: UserId },
    /// A required field was missing at save time; nothing was committed.
    #[error("validation failed for {field}: {message}")]
    Validation { field: String, message: String },
    /// The store could not be reached or the operation failed mid-flight.
    #[error("user store failure: {message}")]
    Io { message: String },
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new aggregate, assigning its identity.
    async fn create(&self, new_user: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch one aggregate, embedded collection included.
    async fn load(&self, id: &UserId) -> Result<User, UserPersistenceError>;

    /// Fetch every aggregate in creation order.
    async fn load_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Replace the stored document with the caller's copy, atomically from
    /// the caller's perspective.
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError>;
}
