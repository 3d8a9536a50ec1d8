//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage.
///
/// Implementations own uniqueness: `create` must reject a colliding email
/// with [`DomainError::DuplicateEmail`] and a colliding username (with a
/// novel email) with [`DomainError::DuplicateUsername`], deciding this in
/// the same atomic step as the insert.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned ID
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError>;

    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// List all users ordered by creation time
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count users holding the given email
    async fn count_by_email(&self, email: &str) -> Result<usize, DomainError>;

    /// Round-trip the backing store
    async fn ping(&self) -> Result<(), DomainError>;
}
