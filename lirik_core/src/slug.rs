//! Slug generation for song URLs.

use std::collections::HashMap;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::id::SongId;


/// Maximum length of a generated slug, in characters.
pub const MAXIMUM_SLUG_LENGTH: usize = 80;


/// Turns arbitrary text into a URL-safe slug.
///
/// The text is lowercased and NFKD-normalized, diacritics are dropped and every
/// run of characters outside `[a-z0-9]` becomes a single `-`. Leading and trailing
/// dashes are removed and the result is capped at [`MAXIMUM_SLUG_LENGTH`] characters.
///
/// Returns `None` if nothing usable remains (e.g. the input was only punctuation).
pub fn slugify(value: &str) -> Option<String> {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for character in value.to_lowercase().nfkd() {
        if is_combining_mark(character) {
            continue;
        }

        if character.is_ascii_lowercase() || character.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }

            pending_separator = false;
            slug.push(character);
        } else {
            pending_separator = true;
        }
    }

    let truncated: String = slug.chars().take(MAXIMUM_SLUG_LENGTH).collect();
    let truncated = truncated.trim_end_matches('-');

    if truncated.is_empty() {
        None
    } else {
        Some(truncated.to_string())
    }
}

/// Like [`slugify`], but falls back to a freshly generated opaque identifier.
pub fn slugify_or_generate(value: &str) -> String {
    slugify(value).unwrap_or_else(|| SongId::generate().into_inner())
}



/// Hands out unique slugs by appending `-2`, `-3`, ... to repeated base slugs.
#[derive(Default, Debug)]
pub struct SlugDeduplicator {
    seen_base_slugs: HashMap<String, usize>,
}

impl SlugDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unique_slug(&mut self, base_slug: &str) -> String {
        let occurrences = self
            .seen_base_slugs
            .entry(base_slug.to_string())
            .or_insert(0);

        *occurrences += 1;

        if *occurrences == 1 {
            base_slug.to_string()
        } else {
            format!("{}-{}", base_slug, occurrences)
        }
    }
}
