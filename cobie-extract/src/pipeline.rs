//! The extraction run: read, build schemas, materialize, load
//!
//! `plan` is pure and does no I/O on the store, so malformed cells and
//! schema conflicts abort before any table exists. `execute` then does all
//! store writes sequentially over the connection held by the `RunContext`.

use std::path::Path;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::error::ExtractError;
use crate::schema::{TableSchema, build_schemas};
use crate::store;
use crate::workbook::{Record, Workbook, read_workbook};

/// State shared by the store-facing stages of one run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub pool: SqlitePool,
    pub excluded_sheets: Vec<String>,
}

impl RunContext {
    pub fn new(pool: SqlitePool, excluded_sheets: Vec<String>) -> Self {
        Self {
            pool,
            excluded_sheets,
        }
    }

    /// Open (or create) the store at `output` using `config`
    pub async fn connect(output: &Path, config: &Config) -> Result<Self, ExtractError> {
        let pool = store::connect(output, &config.store).await?;
        Ok(Self::new(pool, config.excluded_sheets.clone()))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A table to create and the records destined for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTable {
    pub schema: TableSchema,
    pub records: Vec<Record>,
}

/// Everything a run will write, computed without touching the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadPlan {
    pub tables: Vec<PlannedTable>,
    pub skipped_sheets: Vec<String>,
}

impl LoadPlan {
    pub fn schemas(&self) -> Vec<TableSchema> {
        self.tables.iter().map(|t| t.schema.clone()).collect()
    }

    pub fn total_records(&self) -> usize {
        self.tables.iter().map(|t| t.records.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    /// false when the table was already in the store
    pub created: bool,
    pub rows_loaded: usize,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub tables: Vec<TableReport>,
    pub skipped_sheets: Vec<String>,
}

impl RunReport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows_loaded).sum()
    }
}

/// Read the workbook and build every schema
pub fn plan(workbook: &Workbook, excluded: &[String]) -> Result<LoadPlan, ExtractError> {
    let data = read_workbook(workbook, excluded)?;
    let schemas = build_schemas(&data)?;

    let tables = schemas
        .into_iter()
        .zip(data.sheets)
        .map(|(schema, sheet)| PlannedTable {
            schema,
            records: sheet.records,
        })
        .collect();

    Ok(LoadPlan {
        tables,
        skipped_sheets: data.skipped,
    })
}

/// Materialize every planned schema, then load every planned table
pub async fn execute(ctx: &RunContext, plan: &LoadPlan) -> Result<RunReport, ExtractError> {
    let outcomes = store::materialize(&ctx.pool, &plan.schemas()).await?;

    let mut tables = Vec::with_capacity(plan.tables.len());
    for (planned, outcome) in plan.tables.iter().zip(outcomes) {
        let rows_loaded = store::load(&ctx.pool, &planned.schema.name, &planned.records).await?;
        tables.push(TableReport {
            table: outcome.table,
            created: outcome.created,
            rows_loaded,
        });
    }

    Ok(RunReport {
        tables,
        skipped_sheets: plan.skipped_sheets.clone(),
    })
}

/// Plan and execute an already decoded workbook
pub async fn run_workbook(ctx: &RunContext, workbook: &Workbook) -> Result<RunReport, ExtractError> {
    let plan = plan(workbook, &ctx.excluded_sheets)?;
    execute(ctx, &plan).await
}

/// Transcribe the workbook at `input` into the SQLite store at `output`
/// with the default excluded sheets
pub async fn run(input: &Path, output: &Path) -> Result<RunReport, ExtractError> {
    run_with_config(input, output, &Config::default()).await
}

/// Like `run`, with explicit configuration
///
/// The store is only opened once the workbook has been fully planned.
pub async fn run_with_config(
    input: &Path,
    output: &Path,
    config: &Config,
) -> Result<RunReport, ExtractError> {
    log::info!("Reading workbook {}", input.display());
    let workbook = Workbook::open(input)?;
    let plan = plan(&workbook, &config.excluded_sheets)?;
    log::info!(
        "Planned {} tables with {} records",
        plan.tables.len(),
        plan.total_records()
    );

    let ctx = RunContext::connect(output, config).await?;
    let result = execute(&ctx, &plan).await;
    ctx.close().await;
    result
}
