//! Insert records into materialized tables

use sqlx::SqlitePool;

use super::sql::build_insert_sql;
use crate::error::ExtractError;
use crate::workbook::Record;

/// Insert `records` into `table`, one statement per record
///
/// All inserts for the table share one transaction, so a rejected record
/// leaves nothing of this table's batch behind. There is no deduplication:
/// loading the same records twice stores them twice.
pub async fn load(
    pool: &SqlitePool,
    table: &str,
    records: &[Record],
) -> Result<usize, ExtractError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|source| ExtractError::Transaction {
            table: table.to_string(),
            source,
        })?;

    for record in records {
        let sql = build_insert_sql(table, &record.columns());
        let mut query = sqlx::query(&sql);
        for (_, value) in &record.fields {
            query = query.bind(value.as_str());
        }

        if let Err(source) = query.execute(&mut *tx).await {
            log::error!(
                "Insert into '{}' failed at sheet row {}: {}",
                table,
                record.sheet_row,
                source
            );
            if let Err(rollback_err) = tx.rollback().await {
                log::warn!("Rollback of '{}' failed: {}", table, rollback_err);
            }
            return Err(ExtractError::Insertion {
                table: table.to_string(),
                row: record.sheet_row,
                source,
            });
        }
    }

    tx.commit()
        .await
        .map_err(|source| ExtractError::Transaction {
            table: table.to_string(),
            source,
        })?;

    log::info!("Loaded {} records into '{}'", records.len(), table);
    Ok(records.len())
}
