//! Turning lyric dumps into seedable songs.

use lirik_core::language::{LanguageClassifier, DEFAULT_SONG_LANGUAGE};
use lirik_core::slug::{slugify_or_generate, SlugDeduplicator};
use serde::{Deserialize, Serialize};

use crate::errors::SeedInputError;


/// A song ready to be written into the catalog.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SeedSong {
    pub title: String,

    pub slug: String,

    pub artist: Option<String>,

    pub language: String,

    pub body: String,
}


/// One element of a JSON seed file.
#[derive(Deserialize, Debug)]
struct JsonSeedSong {
    title: String,

    #[serde(default)]
    slug: Option<String>,

    #[serde(default)]
    artist: Option<String>,

    #[serde(default)]
    language: Option<String>,

    body: String,
}


fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Header lines look like `Title | Artist`. Chorus markers such as `Reff | ...` are lyrics.
fn parse_header_line(line: &str) -> Option<(&str, Option<&str>)> {
    let line = line.trim();

    if !line.contains('|') || line.starts_with("Reff") {
        return None;
    }

    let mut parts = line.split('|').map(str::trim);
    let title = parts.next().unwrap_or_default();
    let artist = parts.next().and_then(non_blank);

    Some((title, artist))
}


struct TextSongBuilder<'c> {
    classifier: &'c dyn LanguageClassifier,
    slugs: SlugDeduplicator,
    songs: Vec<SeedSong>,
}

impl<'c> TextSongBuilder<'c> {
    /// Finishes a song. Songs without a title or without any lyrics are dropped.
    fn finish_song(&mut self, title: &str, artist: Option<&str>, body_lines: &[&str]) {
        let Some(title) = non_blank(title) else {
            return;
        };

        let body = body_lines.join("\n").trim().to_string();
        if body.is_empty() {
            return;
        }

        let slug = self.slugs.unique_slug(&slugify_or_generate(title));

        self.songs.push(SeedSong {
            title: title.to_string(),
            slug,
            artist: artist.map(str::to_string),
            language: self.classifier.detect_language(&body).to_string(),
            body,
        });
    }
}


/// Parses a plain-text lyric dump.
///
/// Each song starts with a `Title | Artist` header line (the artist may be empty)
/// and continues until the next header. Lines before the first header are ignored.
/// Repeated titles get `-2`, `-3`, ... slug suffixes, in order of appearance.
pub fn parse_songs_from_text(
    contents: &str,
    classifier: &dyn LanguageClassifier,
) -> Vec<SeedSong> {
    let mut builder = TextSongBuilder {
        classifier,
        slugs: SlugDeduplicator::new(),
        songs: Vec::new(),
    };

    let mut current_header: Option<(&str, Option<&str>)> = None;
    let mut body_lines: Vec<&str> = Vec::new();

    for line in contents.lines() {
        if let Some(header) = parse_header_line(line) {
            if let Some((title, artist)) = current_header.take() {
                builder.finish_song(title, artist, &body_lines);
            }

            body_lines.clear();
            current_header = Some(header);
            continue;
        }

        if current_header.is_some() {
            body_lines.push(line);
        }
    }

    if let Some((title, artist)) = current_header {
        builder.finish_song(title, artist, &body_lines);
    }

    builder.songs
}


/// Parses a JSON seed file (an array of songs).
///
/// Missing slugs are derived from titles, and every slug is made unique.
/// Missing or blank languages default to `id`.
pub fn parse_songs_from_json(contents: &str) -> Result<Vec<SeedSong>, SeedInputError> {
    let entries: Vec<JsonSeedSong> = serde_json::from_str(contents)
        .map_err(|error| SeedInputError::InvalidJson { error })?;

    let mut slugs = SlugDeduplicator::new();
    let mut songs = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let Some(title) = non_blank(&entry.title) else {
            return Err(SeedInputError::MissingTitle { index });
        };

        let base_slug = match entry.slug.as_deref().and_then(non_blank) {
            Some(slug) => slugify_or_generate(slug),
            None => slugify_or_generate(title),
        };

        songs.push(SeedSong {
            title: title.to_string(),
            slug: slugs.unique_slug(&base_slug),
            artist: entry
                .artist
                .as_deref()
                .and_then(non_blank)
                .map(str::to_string),
            language: entry
                .language
                .as_deref()
                .and_then(non_blank)
                .unwrap_or(DEFAULT_SONG_LANGUAGE.as_str())
                .to_string(),
            body: entry.body,
        });
    }

    Ok(songs)
}
