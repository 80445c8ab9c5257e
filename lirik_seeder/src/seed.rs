use std::fs;
use std::path::Path;

use lirik_configuration::Configuration;
use lirik_core::language::KeywordLanguageClassifier;
use lirik_database::connection::establish_database_connection_pool;
use lirik_database::entities::{NewSong, SongMutation};
use lirik_database::migrations::apply_pending_migrations;
use miette::{miette, Context, IntoDiagnostic, Result};

use crate::cli::SeedCommandArguments;
use crate::parsing::{parse_songs_from_json, parse_songs_from_text, SeedSong};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SeedInputFormat {
    Text,
    Json,
}


fn write_snapshot(snapshot_output_path: &Path, songs: &[SeedSong]) -> Result<()> {
    if let Some(parent_directory) = snapshot_output_path.parent() {
        if !parent_directory.as_os_str().is_empty() {
            fs::create_dir_all(parent_directory)
                .into_diagnostic()
                .wrap_err("failed to create snapshot output directory")?;
        }
    }

    let serialized_songs = serde_json::to_string_pretty(songs)
        .into_diagnostic()
        .wrap_err("failed to serialize parsed songs")?;

    fs::write(snapshot_output_path, serialized_songs)
        .into_diagnostic()
        .wrap_err("failed to write parsed song snapshot")
}

fn load_configuration(arguments: &SeedCommandArguments) -> Result<Configuration> {
    match arguments.configuration_file_path.as_ref() {
        Some(path) => Configuration::load_from_path(path),
        None => Configuration::load_from_default_path(),
    }
    .into_diagnostic()
    .wrap_err("failed to load configuration file")
}


pub fn cli_seed(arguments: SeedCommandArguments, input_format: SeedInputFormat) -> Result<()> {
    let async_runtime = tokio::runtime::Runtime::new()
        .into_diagnostic()
        .wrap_err("failed to initialize tokio async runtime")?;

    async_runtime
        .block_on(cli_seed_inner(arguments, input_format))
        .wrap_err("failed to run root async task to completion")
}


async fn cli_seed_inner(arguments: SeedCommandArguments, input_format: SeedInputFormat) -> Result<()> {
    let input_contents = fs::read_to_string(&arguments.input_file_path)
        .into_diagnostic()
        .wrap_err_with(|| {
            format!(
                "failed to read input file {}",
                arguments.input_file_path.display()
            )
        })?;

    let songs = match input_format {
        SeedInputFormat::Text => {
            parse_songs_from_text(&input_contents, &KeywordLanguageClassifier::default())
        }
        SeedInputFormat::Json => parse_songs_from_json(&input_contents)
            .into_diagnostic()
            .wrap_err("failed to parse JSON input")?,
    };

    if songs.is_empty() {
        return Err(miette!(
            "no songs parsed from {}",
            arguments.input_file_path.display()
        ));
    }

    write_snapshot(&arguments.snapshot_output_path, &songs)?;

    if arguments.dry_run {
        println!(
            "Parsed {} songs from {} (snapshot at {}). Dry run, so the database was not touched.",
            songs.len(),
            arguments.input_file_path.display(),
            arguments.snapshot_output_path.display()
        );

        return Ok(());
    }


    let configuration = load_configuration(&arguments)?;

    configuration
        .database
        .create_database_directory_if_missing()
        .into_diagnostic()
        .wrap_err("failed to create the database directory")?;

    print!("Connecting to the SQLite database...");

    let database_pool = establish_database_connection_pool(&configuration.database)
        .await
        .into_diagnostic()
        .wrap_err("failed to connect to the database")?;

    println!("  [Connected!]");


    let mut database_connection = database_pool
        .acquire()
        .await
        .into_diagnostic()
        .wrap_err("failed to acquire database connection")?;

    let applied_migration_count = apply_pending_migrations(&mut database_connection)
        .await
        .into_diagnostic()
        .wrap_err("failed to apply pending migrations")?;

    if applied_migration_count > 0 {
        println!("Applied {} pending migrations.", applied_migration_count);
    }

    drop(database_connection);


    let mut transaction = database_pool
        .begin()
        .await
        .into_diagnostic()
        .wrap_err("failed to begin transaction")?;

    let song_count = songs.len();

    for song in songs {
        SongMutation::upsert(
            &mut transaction,
            NewSong {
                slug: song.slug,
                title: song.title,
                artist: song.artist,
                language: song.language,
                body: song.body,
            },
        )
        .await
        .into_diagnostic()
        .wrap_err("failed to upsert song")?;
    }

    transaction
        .commit()
        .await
        .into_diagnostic()
        .wrap_err("failed to commit seeded songs")?;

    println!(
        "Seeded {} songs from {} into {}.",
        song_count,
        arguments.input_file_path.display(),
        configuration.database.database_file_path.display()
    );

    Ok(())
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_snapshot_creating_directories() {
        let temporary_directory = tempfile::tempdir().unwrap();
        let snapshot_path = temporary_directory
            .path()
            .join("seed")
            .join("parsed-songs.json");

        let songs = vec![SeedSong {
            title: "Bapa".to_string(),
            slug: "bapa".to_string(),
            artist: None,
            language: "id".to_string(),
            body: "Bapa di sorga".to_string(),
        }];

        write_snapshot(&snapshot_path, &songs).unwrap();

        let written: Vec<SeedSong> =
            serde_json::from_str(&fs::read_to_string(&snapshot_path).unwrap()).unwrap();
        assert_eq!(written, songs);
    }
}
