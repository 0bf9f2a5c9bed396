//! Create tables for built schemas

use sqlx::SqlitePool;

use super::sql::build_create_table_sql;
use crate::error::ExtractError;
use crate::schema::TableSchema;

/// What happened to one schema during materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeOutcome {
    pub table: String,
    /// false when the table already existed and was left alone
    pub created: bool,
}

/// Check whether a table exists (SQLite table names are case-insensitive)
pub async fn table_exists(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ? COLLATE NOCASE",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

/// Create every table in `schemas` that the store does not have yet
///
/// Existing tables are never recreated or altered, whatever their shape.
pub async fn materialize(
    pool: &SqlitePool,
    schemas: &[TableSchema],
) -> Result<Vec<MaterializeOutcome>, ExtractError> {
    let mut outcomes = Vec::with_capacity(schemas.len());

    for schema in schemas {
        let exists = table_exists(pool, &schema.name)
            .await
            .map_err(|source| ExtractError::Materialize {
                table: schema.name.clone(),
                source,
            })?;

        if exists {
            log::info!("Table '{}' already exists, leaving it as is", schema.name);
            outcomes.push(MaterializeOutcome {
                table: schema.name.clone(),
                created: false,
            });
            continue;
        }

        let sql = build_create_table_sql(schema);
        sqlx::query(&sql)
            .execute(pool)
            .await
            .map_err(|source| ExtractError::Materialize {
                table: schema.name.clone(),
                source,
            })?;

        log::info!(
            "Created table '{}' with {} columns",
            schema.name,
            schema.columns.len()
        );
        outcomes.push(MaterializeOutcome {
            table: schema.name.clone(),
            created: true,
        });
    }

    Ok(outcomes)
}
