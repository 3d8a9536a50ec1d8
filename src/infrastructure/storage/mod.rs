//! Storage infrastructure - connection pooling, backend selection, migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::StorageType;
pub use migrations::{run_migrations, users_migrations, Migration, Migrator, PostgresMigrator};
pub use postgres::{connect, PostgresConfig};
