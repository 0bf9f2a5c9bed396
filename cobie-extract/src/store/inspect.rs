//! Read-only inspection of a produced store

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use super::sql::quote_identifier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub column_type: String,
    pub primary_key: bool,
}

/// Summary of a table (for listing)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub row_count: i64,
}

/// List user tables in creation order
pub async fn list_tables(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY rowid",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list tables")?;

    Ok(rows.into_iter().map(|(name,)| name).collect())
}

/// Columns of a table in declaration order
pub async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<ColumnInfo>> {
    let rows = sqlx::query("SELECT name, type, pk FROM pragma_table_info(?) ORDER BY cid")
        .bind(table)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Failed to get columns of table '{}'", table))?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        columns.push(ColumnInfo {
            name: row.try_get("name")?,
            column_type: row.try_get("type")?,
            primary_key: row.try_get::<i64, _>("pk")? != 0,
        });
    }

    Ok(columns)
}

pub async fn row_count(pool: &SqlitePool, table: &str) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
    let (count,): (i64,) = sqlx::query_as(&sql)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to count rows of table '{}'", table))?;

    Ok(count)
}

/// Tables, columns and row counts of the whole store
pub async fn inspect_store(pool: &SqlitePool) -> Result<Vec<TableSummary>> {
    let mut summaries = Vec::new();
    for name in list_tables(pool).await? {
        let columns = table_columns(pool, &name).await?;
        let row_count = row_count(pool, &name).await?;
        summaries.push(TableSummary {
            name,
            columns,
            row_count,
        });
    }
    Ok(summaries)
}
