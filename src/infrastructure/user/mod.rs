//! User infrastructure module
//!
//! Storage backends for users (PostgreSQL and in-memory) and the user
//! service that request handlers call.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::{PostgresUserRepository, EMAIL_CONSTRAINT, USERNAME_CONSTRAINT};
pub use repository::InMemoryUserRepository;
pub use service::{UserService, PONG};
