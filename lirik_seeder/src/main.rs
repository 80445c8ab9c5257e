use clap::Parser;
use cli::{CliArgs, CliCommand};
use lirik_configuration::load_environment_file;
use miette::{Context, IntoDiagnostic, Result};
use seed::{cli_seed, SeedInputFormat};

mod cli;
mod errors;
mod parsing;
mod seed;


pub fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    load_environment_file()
        .into_diagnostic()
        .wrap_err("failed to load .env file")?;

    match cli_args.command {
        CliCommand::FromText(seed_command_args) => cli_seed(seed_command_args, SeedInputFormat::Text),
        CliCommand::FromJson(seed_command_args) => cli_seed(seed_command_args, SeedInputFormat::Json),
    }
}
