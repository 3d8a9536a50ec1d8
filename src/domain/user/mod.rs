//! User domain
//!
//! Domain types and traits for user accounts: the entity, the creation
//! payload checks, and the repository trait storage backends implement.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_new_user, validate_username, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
