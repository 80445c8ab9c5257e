use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};


#[derive(Parser)]
#[command(
    name = "lirik_seeder",
    author,
    about = "Seeds the Lirik song catalog from lyric dumps.",
    version
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}


#[derive(Subcommand)]
pub enum CliCommand {
    #[command(
        name = "from-text",
        about = "Seeds songs from a plain-text dump where each song starts with a \"Title | Artist\" header line."
    )]
    FromText(SeedCommandArguments),

    #[command(
        name = "from-json",
        about = "Seeds songs from a JSON array of { title, slug?, artist?, language?, body } objects."
    )]
    FromJson(SeedCommandArguments),
}


#[derive(Args)]
pub struct SeedCommandArguments {
    #[arg(help = "Path to the input file.")]
    pub input_file_path: PathBuf,

    #[arg(
        short = 'c',
        long = "configurationFilePath",
        help = "Path to the configuration file to use (for the database location). \
                Defaults to ./data/configuration.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(
        long = "snapshot-output",
        default_value = "seed/parsed-songs.json",
        help = "Where to write the JSON snapshot of the parsed songs, for review before seeding."
    )]
    pub snapshot_output_path: PathBuf,

    #[arg(
        long = "dry-run",
        action = ArgAction::SetTrue,
        help = "Parse the input and write the snapshot, but don't touch the database."
    )]
    pub dry_run: bool,
}
