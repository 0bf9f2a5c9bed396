//! Inspect command handler

use anyhow::{Context, Result};
use colored::*;

use super::{InspectCommands, OutputFormat};
use cobie_extract::store::{self, TableSummary};

/// Handle the inspect command
pub async fn handle_inspect_command(args: InspectCommands) -> Result<()> {
    let pool = store::open_existing(&args.database).await?;
    let summaries = store::inspect_store(&pool).await;
    pool.close().await;
    let summaries = summaries?;

    println!("{}", format_output(&summaries, args.format)?);
    Ok(())
}

/// Format table summaries according to the requested output format
fn format_output(summaries: &[TableSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(summaries).context("Failed to format JSON output")
        }
        OutputFormat::Table => Ok(format_table(summaries)),
    }
}

fn format_table(summaries: &[TableSummary]) -> String {
    if summaries.is_empty() {
        return "No tables".to_string();
    }

    let mut out = String::new();
    for summary in summaries {
        out.push_str(&format!(
            "{} ({} rows)\n",
            summary.name.bold(),
            summary.row_count.to_string().bright_green()
        ));
        for column in &summary.columns {
            let key = if column.primary_key { " PK" } else { "" };
            out.push_str(&format!(
                "  {} {}{}\n",
                column.name,
                column.column_type.dimmed(),
                key
            ));
        }
    }
    out.trim_end().to_string()
}
