//! Table schemas derived from sheet headers
//!
//! Every sheet maps to one table named after it. Columns are the lower-cased
//! headers in sheet order, behind a synthetic integer primary key `id`.

use std::collections::HashMap;

use crate::error::ExtractError;
use crate::workbook::WorkbookData;

/// Name of the synthetic primary key column
pub const ID_COLUMN: &str = "id";

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    pub fn sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub primary_key: bool,
}

impl Column {
    fn id() -> Self {
        Self {
            name: ID_COLUMN.to_string(),
            column_type: ColumnType::Integer,
            primary_key: true,
        }
    }

    fn text(name: String) -> Self {
        Self {
            name,
            column_type: ColumnType::Text,
            primary_key: false,
        }
    }
}

/// Schema of one table; `columns[0]` is always the `id` key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Column name for a header
pub fn column_name(header: &str) -> String {
    header.to_lowercase()
}

/// Build the schema for one sheet from its headers
pub fn build_schema(table: &str, headers: &[String]) -> Result<TableSchema, ExtractError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    seen.insert(ID_COLUMN.to_string(), ID_COLUMN);

    let mut columns = Vec::with_capacity(headers.len() + 1);
    columns.push(Column::id());

    for header in headers {
        let name = column_name(header);
        if let Some(first) = seen.get(&name) {
            return Err(ExtractError::SchemaConflict {
                table: table.to_string(),
                column: name,
                first: first.to_string(),
                second: header.clone(),
            });
        }
        seen.insert(name.clone(), header);
        columns.push(Column::text(name));
    }

    Ok(TableSchema {
        name: table.to_string(),
        columns,
    })
}

/// Build schemas for every sheet read from a workbook, in sheet order
pub fn build_schemas(data: &WorkbookData) -> Result<Vec<TableSchema>, ExtractError> {
    data.sheets
        .iter()
        .map(|sheet| build_schema(&sheet.name, &sheet.headers))
        .collect()
}
