//! Infrastructure layer - storage backends, logging, services

pub mod logging;
pub mod storage;
pub mod user;
