//! SQLite store: connection setup, table creation, record loading and
//! read-only inspection

pub mod inspect;
pub mod records;
pub mod schema;
pub mod sql;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::StoreConfig;
use crate::error::ExtractError;

pub use inspect::{ColumnInfo, TableSummary, inspect_store, list_tables, row_count, table_columns};
pub use records::load;
pub use schema::{MaterializeOutcome, materialize, table_exists};

/// Open (or create) the target store with a single connection
pub async fn connect(path: &Path, config: &StoreConfig) -> Result<SqlitePool, ExtractError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|source| ExtractError::StoreConnection {
            target: path.display().to_string(),
            source,
        })?;

    log::debug!("Connected to store {}", path.display());
    Ok(pool)
}

/// Open an existing store read-only
pub async fn open_existing(path: &Path) -> Result<SqlitePool> {
    if !path.exists() {
        anyhow::bail!("Database does not exist: {}", path.display());
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database: {}", path.display()))
}
