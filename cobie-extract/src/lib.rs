//! Transcribe COBie exchange workbooks into SQLite
//!
//! Each non-excluded worksheet becomes one table named after the sheet, with
//! a leading `id INTEGER PRIMARY KEY` and one `TEXT` column per header
//! (lower-cased). Each data row becomes one inserted record.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod schema;
pub mod store;
pub mod workbook;

pub use config::{Config, StoreConfig};
pub use error::{ExtractError, Stage};
pub use pipeline::{
    LoadPlan, PlannedTable, RunContext, RunReport, TableReport, execute, plan, run,
    run_with_config, run_workbook,
};
pub use schema::{TableSchema, build_schema, build_schemas};
pub use workbook::{Record, Sheet, Workbook, normalize, read_workbook};
