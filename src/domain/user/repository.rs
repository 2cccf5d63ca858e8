//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage.
///
/// Implementations assign the surrogate user id on `create` and ids for any
/// new addresses on `create` and `update`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their phone number
    async fn get_by_phone_number(&self, phone_number: &str) -> Result<Option<User>, DomainError>;

    /// Store a new user and return it with its assigned id
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// List users, optionally only the active ones
    async fn list(&self, active_only: bool) -> Result<Vec<User>, DomainError>;

    /// Check if a user ID exists
    async fn exists(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
