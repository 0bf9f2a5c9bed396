//! Error kinds raised by the extraction pipeline
//!
//! Every variant names the stage it belongs to and the sheet/table/row that
//! triggered it. All of them are fatal to a run.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    SchemaBuild,
    Materialize,
    Load,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Read => write!(f, "read"),
            Stage::SchemaBuild => write!(f, "schema build"),
            Stage::Materialize => write!(f, "materialize"),
            Stage::Load => write!(f, "load"),
        }
    }
}

/// Error from any stage of an extraction run
///
/// Row and column numbers are 1-based, as shown by spreadsheet applications.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("[read] failed to open workbook {}", .path.display())]
    WorkbookOpen {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("[read] failed to read sheet '{sheet}'")]
    SheetRead {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("[read] sheet '{sheet}' row {row} column {column}: malformed cell value {raw:?}")]
    MalformedCellValue {
        sheet: String,
        row: usize,
        column: usize,
        raw: String,
    },

    #[error(
        "[schema build] table '{table}' would have duplicate column '{column}' (from headers {first:?} and {second:?})"
    )]
    SchemaConflict {
        table: String,
        column: String,
        first: String,
        second: String,
    },

    #[error("[materialize] failed to open store '{target}'")]
    StoreConnection {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("[materialize] failed to create table '{table}'")]
    Materialize {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("[load] transaction for table '{table}' failed")]
    Transaction {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("[load] insert into table '{table}' rejected for sheet row {row}")]
    Insertion {
        table: String,
        row: usize,
        #[source]
        source: sqlx::Error,
    },
}

impl ExtractError {
    /// The stage this error aborted
    pub fn stage(&self) -> Stage {
        match self {
            ExtractError::WorkbookOpen { .. }
            | ExtractError::SheetRead { .. }
            | ExtractError::MalformedCellValue { .. } => Stage::Read,
            ExtractError::SchemaConflict { .. } => Stage::SchemaBuild,
            ExtractError::StoreConnection { .. } | ExtractError::Materialize { .. } => {
                Stage::Materialize
            }
            ExtractError::Transaction { .. } | ExtractError::Insertion { .. } => Stage::Load,
        }
    }
}
