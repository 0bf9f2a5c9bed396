//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::convert::ConvertCommands;
use commands::inspect::InspectCommands;

#[derive(Parser, Debug)]
#[command(name = "cobie-extract", version, about = "Transcribe COBie workbooks into SQLite")]
pub struct Cli {
    /// Path to a config file (defaults to <config dir>/cobie-extract/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a workbook into a SQLite database
    Convert(ConvertCommands),
    /// List tables, columns and row counts of a converted database
    Inspect(InspectCommands),
}

impl Cli {
    /// Default log filter for env_logger; RUST_LOG still wins
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::parse_from([
            "cobie-extract",
            "convert",
            "facility.xls",
            "facility.db",
            "--exclude",
            "Instruction",
            "--exclude",
            "Attribute",
            "--dry-run",
        ]);

        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.input, PathBuf::from("facility.xls"));
                assert_eq!(args.output, Some(PathBuf::from("facility.db")));
                assert_eq!(args.exclude, vec!["Instruction", "Attribute"]);
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_inspect_with_global_flags() {
        let cli = Cli::parse_from(["cobie-extract", "inspect", "facility.db", "--format", "json", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.log_filter(), "debug");
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["cobie-extract", "-v", "-q", "inspect", "x.db"]).is_err());
    }
}
