//! Convert command handler

use anyhow::{Context, Result};
use colored::*;
use std::time::Instant;

use super::ConvertCommands;
use cobie_extract::pipeline::{self, LoadPlan, RunContext, RunReport};
use cobie_extract::{Config, Workbook};

/// Handle the convert command
pub async fn handle_convert_command(args: ConvertCommands, mut config: Config) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Workbook does not exist: {}", args.input.display());
    }

    if !args.exclude.is_empty() {
        config.excluded_sheets = args.exclude.clone();
    }

    let start = Instant::now();

    let workbook = Workbook::open(&args.input)
        .with_context(|| format!("Failed to read workbook: {}", args.input.display()))?;
    let plan = pipeline::plan(&workbook, &config.excluded_sheets)
        .context("Workbook cannot be transcribed")?;

    if args.dry_run {
        print_plan(&plan);
        return Ok(());
    }

    let output = args
        .output
        .as_deref()
        .context("An output database is required unless --dry-run is given")?;

    let ctx = RunContext::connect(output, &config).await?;
    let result = pipeline::execute(&ctx, &plan).await;
    ctx.close().await;
    let report = result.with_context(|| format!("Failed to write {}", output.display()))?;

    print_report(&report);
    println!(
        "Wrote {} rows to {} in {:.2}s",
        report.total_rows().to_string().bright_green().bold(),
        output.display().to_string().cyan(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn print_plan(plan: &LoadPlan) {
    println!("{}", "Dry run, nothing written".yellow());
    for table in &plan.tables {
        println!(
            "  {} ({} columns, {} rows)",
            table.schema.name.bold(),
            table.schema.columns.len(),
            table.records.len()
        );
        println!("    {}", table.schema.column_names().join(", ").dimmed());
    }
    print_skipped(&plan.skipped_sheets);
}

fn print_report(report: &RunReport) {
    for table in &report.tables {
        let status = if table.created {
            "created".green()
        } else {
            "existing".yellow()
        };
        println!(
            "  {} [{}] {} rows",
            table.table.bold(),
            status,
            table.rows_loaded
        );
    }
    print_skipped(&report.skipped_sheets);
}

fn print_skipped(skipped: &[String]) {
    if !skipped.is_empty() {
        println!("  skipped: {}", skipped.join(", ").dimmed());
    }
}
