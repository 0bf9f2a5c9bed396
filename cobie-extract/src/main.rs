use anyhow::Result;
use clap::Parser;

mod cli;

use cli::commands::{convert, inspect};
use cli::{Cli, Commands};
use cobie_extract::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Convert(args) => {
            let config = Config::load(cli.config.as_deref())?;
            convert::handle_convert_command(args, config).await
        }
        Commands::Inspect(args) => inspect::handle_inspect_command(args).await,
    }
}
