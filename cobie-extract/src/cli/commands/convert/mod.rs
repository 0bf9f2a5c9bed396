//! `convert` command: workbook in, SQLite database out

mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_convert_command;

#[derive(Args, Debug)]
pub struct ConvertCommands {
    /// Workbook to read (xls, xlsx, xlsm, xlsb, ods)
    pub input: PathBuf,

    /// SQLite database to write; created if absent
    #[arg(required_unless_present = "dry_run")]
    pub output: Option<PathBuf>,

    /// Sheet to skip; repeat to skip several (replaces the configured list)
    #[arg(long, value_name = "SHEET")]
    pub exclude: Vec<String>,

    /// Only read and validate the workbook; do not touch the database
    #[arg(long)]
    pub dry_run: bool,
}
