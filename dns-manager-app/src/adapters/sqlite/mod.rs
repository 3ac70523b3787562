//! SQLite-based unified store using `SeaORM`.
//!
//! A single `SqliteStore` implements every repository trait of the core
//! crate (accounts, domains, DNS records, presets, activity log) against one
//! local `SQLite` database.

mod account_repo;
mod activity_repo;
mod domain_repo;
pub(crate) mod entity;
mod migration;
mod preset_repo;
mod record_repo;

use std::path::Path;

use chrono::{DateTime, Utc};
use dns_manager_core::error::{CoreError, CoreResult};
use dns_manager_core::utils::datetime;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use migration::Migrator;

/// SQLite-based store shared by every repository trait.
///
/// Multi-row changes (pull replacement, cascading deletes) run inside a
/// transaction so a failure leaves the previous rows in place.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `db_path` and migrates it.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        log::debug!("SQLite store ready at {}", db_path.display());
        Ok(store)
    }
}

/// Parses a stored RFC3339 column.
pub(crate) fn parse_timestamp(column: &str, value: &str) -> CoreResult<DateTime<Utc>> {
    datetime::parse(value).ok_or_else(|| {
        CoreError::SerializationError(format!("Invalid {column}: {value}"))
    })
}

/// Reads an integer column into a narrower domain type.
pub(crate) fn narrow<T, S>(column: &str, value: S) -> CoreResult<T>
where
    T: TryFrom<S>,
    S: Copy + std::fmt::Display,
{
    T::try_from(value)
        .map_err(|_| CoreError::SerializationError(format!("{column} out of range: {value}")))
}
