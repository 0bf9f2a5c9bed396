//! `inspect` command: describe a converted database

mod handler;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

pub use handler::handle_inspect_command;

#[derive(Args, Debug)]
pub struct InspectCommands {
    /// SQLite database to inspect
    pub database: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable listing
    Table,
    /// Pretty printed JSON
    Json,
}
