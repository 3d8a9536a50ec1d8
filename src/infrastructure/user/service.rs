//! User service: the boundary request handlers talk to

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::user::{
    validate_email, validate_new_user, validate_username, NewUser, User, UserId, UserRepository,
};
use crate::domain::DomainError;

/// Reply of the liveness check
pub const PONG: &str = "pong!";

/// User service for creation and lookup
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate a raw creation payload and create the user it describes
    pub async fn create_from_payload(&self, payload: Option<&Value>) -> Result<User, DomainError> {
        let new_user = validate_new_user(payload).map_err(|e| {
            debug!(reason = %e, "Rejected user payload");
            DomainError::InvalidPayload
        })?;

        self.create(&new_user.username, &new_user.email).await
    }

    /// Create a new user.
    ///
    /// Blank input is rejected here even if the payload was already
    /// validated; uniqueness is left entirely to the repository.
    pub async fn create(&self, username: &str, email: &str) -> Result<User, DomainError> {
        let username = username.trim();
        let email = email.trim();

        validate_username(username)
            .and_then(|_| validate_email(email))
            .map_err(|e| {
                debug!(reason = %e, "Rejected user fields");
                DomainError::InvalidPayload
            })?;

        match self.repository.create(NewUser::new(username, email)).await {
            Ok(user) => {
                info!(user_id = %user.id(), email = %user.email(), "User created");
                Ok(user)
            }
            Err(e) if e.is_conflict() => {
                warn!(username = %username, email = %email, error = %e, "User create conflict");
                Err(e)
            }
            Err(e) => {
                error!(error = %e, "Failed to create user");
                Err(e)
            }
        }
    }

    /// Get a user by a caller-supplied identifier token.
    ///
    /// Malformed tokens and unknown IDs are both `NotFound`.
    pub async fn get_by_id(&self, token: &str) -> Result<User, DomainError> {
        let Some(user_id) = UserId::parse(token) else {
            debug!(token = %token, "Malformed user ID");
            return Err(DomainError::NotFound);
        };

        let user = self.repository.get(user_id).await.inspect_err(|e| {
            error!(user_id = %user_id, error = %e, "Failed to get user");
        })?;

        user.ok_or_else(|| {
            debug!(user_id = %user_id, "User not found");
            DomainError::NotFound
        })
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await.inspect_err(|e| {
            error!(error = %e, "Failed to list users");
        })
    }

    /// Trivial success signal confirming the service is reachable
    pub fn liveness_check(&self) -> &'static str {
        PONG
    }

    /// Check the backing store answers
    pub async fn readiness_check(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}
