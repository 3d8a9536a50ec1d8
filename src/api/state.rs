//! Application state for shared services

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{DomainError, User, UserRepository};
use crate::infrastructure::user::UserService;

/// Application state handed to every handler.
///
/// Built once by the composition root; cloning only bumps the `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create_from_payload(&self, payload: Option<&Value>) -> Result<User, DomainError>;
    async fn get_by_id(&self, token: &str) -> Result<User, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    fn liveness_check(&self) -> &'static str;
    async fn readiness_check(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn create_from_payload(&self, payload: Option<&Value>) -> Result<User, DomainError> {
        UserService::create_from_payload(self, payload).await
    }

    async fn get_by_id(&self, token: &str) -> Result<User, DomainError> {
        UserService::get_by_id(self, token).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserService::list(self).await
    }

    fn liveness_check(&self) -> &'static str {
        UserService::liveness_check(self)
    }

    async fn readiness_check(&self) -> Result<(), DomainError> {
        UserService::readiness_check(self).await
    }
}
