//! Language codes, search language filters and lyric language detection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Language code assigned to songs that don't specify one.
pub const DEFAULT_SONG_LANGUAGE: LanguageCode = LanguageCode::Indonesian;


/// A two-letter language code the catalog knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "id")]
    Indonesian,

    #[serde(rename = "en")]
    English,
}

impl LanguageCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Indonesian => "id",
            Self::English => "en",
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}


#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized language code: {}", .code)]
pub struct UnrecognizedLanguageCode {
    pub code: String,
}

impl FromStr for LanguageCode {
    type Err = UnrecognizedLanguageCode;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Indonesian),
            "en" => Ok(Self::English),
            _ => Err(UnrecognizedLanguageCode {
                code: code.to_string(),
            }),
        }
    }
}



/// Language restriction applied to a search (`all`, `id` or `en`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum LanguageFilter {
    #[default]
    All,

    Only(LanguageCode),
}

impl LanguageFilter {
    /// Parses the `lang` query parameter.
    ///
    /// Missing or unrecognized values fall back to [`LanguageFilter::All`].
    pub fn from_query_parameter(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::All;
        };

        match LanguageCode::from_str(value) {
            Ok(language) => Self::Only(language),
            Err(_) => Self::All,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(language) => language.as_str(),
        }
    }

    pub const fn language(&self) -> Option<LanguageCode> {
        match self {
            Self::All => None,
            Self::Only(language) => Some(*language),
        }
    }
}

impl std::fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}



/// Something that can guess the language lyrics are written in.
pub trait LanguageClassifier {
    fn detect_language(&self, text: &str) -> LanguageCode;
}


/// Keyword list for a single language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageKeywords {
    pub language: LanguageCode,

    /// Lowercase words; each one found after a space adds one point to the language.
    pub tokens: Vec<String>,
}


/// Scores text by counting known keywords per language.
///
/// The language with the strictly highest non-zero score wins.
/// Otherwise the text is checked for any of the `tie_break_markers`;
/// if one is present, `tie_break_language` wins, otherwise `fallback_language` does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLanguageClassifier {
    pub keywords: Vec<LanguageKeywords>,

    pub tie_break_markers: Vec<String>,

    pub tie_break_language: LanguageCode,

    pub fallback_language: LanguageCode,
}

impl KeywordLanguageClassifier {
    fn score(lowercase_text: &str, tokens: &[String]) -> usize {
        tokens
            .iter()
            .filter(|token| lowercase_text.contains(&format!(" {token}")))
            .count()
    }
}

impl Default for KeywordLanguageClassifier {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|word| word.to_string()).collect()
        }

        Self {
            keywords: vec![
                LanguageKeywords {
                    language: LanguageCode::Indonesian,
                    tokens: words(&[
                        "yang", "dan", "kau", "engkau", "tuhan", "allah", "kasih", "setia", "ku",
                        "mu", "bapa", "roh", "kudus", "sorga", "bahkan", "sebab", "dalam",
                        "hatiku",
                    ]),
                },
                LanguageKeywords {
                    language: LanguageCode::English,
                    tokens: words(&[
                        "the", "and", "lord", "jesus", "love", "grace", "you", "your", "king",
                        "above", "power",
                    ]),
                },
            ],
            tie_break_markers: words(&["kau", "kuu", "ku ", "mu "]),
            tie_break_language: LanguageCode::Indonesian,
            fallback_language: LanguageCode::English,
        }
    }
}

impl LanguageClassifier for KeywordLanguageClassifier {
    fn detect_language(&self, text: &str) -> LanguageCode {
        let lowercase_text = text.to_lowercase();

        let mut best: Option<(LanguageCode, usize)> = None;
        let mut is_tied = false;

        for keywords in &self.keywords {
            let score = Self::score(&lowercase_text, &keywords.tokens);

            match best {
                Some((_, best_score)) if score == best_score => {
                    is_tied = true;
                }
                Some((_, best_score)) if score < best_score => {}
                _ => {
                    best = Some((keywords.language, score));
                    is_tied = false;
                }
            }
        }

        if let Some((language, score)) = best {
            if !is_tied && score > 0 {
                return language;
            }
        }


        let has_tie_break_marker = self
            .tie_break_markers
            .iter()
            .any(|marker| lowercase_text.contains(marker.as_str()));

        if has_tie_break_marker {
            self.tie_break_language
        } else {
            self.fallback_language
        }
    }
}


/// Detects the language of `text` with the default keyword lists.
pub fn detect_language(text: &str) -> LanguageCode {
    KeywordLanguageClassifier::default().detect_language(text)
}
