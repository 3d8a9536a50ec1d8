//! In-memory user repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug)]
struct Inner {
    users: BTreeMap<UserId, User>,
    /// Index for email -> user ID lookup
    email_index: HashMap<String, UserId>,
    /// Index for username -> user ID lookup
    username_index: HashMap<String, UserId>,
    next_id: i64,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            email_index: HashMap::new(),
            username_index: HashMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of UserRepository.
///
/// The uniqueness check and the insert happen under one write lock, which
/// plays the role of the database's unique constraints.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.email_index.contains_key(&new_user.email) {
            return Err(DomainError::DuplicateEmail);
        }

        if inner.username_index.contains_key(&new_user.username) {
            return Err(DomainError::DuplicateUsername);
        }

        let id = UserId::new(inner.next_id)
            .ok_or_else(|| DomainError::internal("User ID sequence exhausted"))?;
        inner.next_id += 1;

        let user = User::from_parts(id, new_user.username, new_user.email, Utc::now());

        inner.email_index.insert(user.email().to_string(), id);
        inner
            .username_index
            .insert(user.username().to_string(), id);
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let inner = self.inner.read().await;

        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by_key(|u| (u.created_at(), u.id()));

        Ok(users)
    }

    async fn count_by_email(&self, email: &str) -> Result<usize, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().filter(|u| u.email() == email).count())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
