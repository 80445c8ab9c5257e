use serde::{Deserialize, Serialize};

use crate::id::SongId;


/// A single ranked search hit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub id: SongId,

    pub slug: String,

    pub title: String,

    pub artist: Option<String>,

    pub language: String,

    /// Highlighted excerpt of the matched text (`<mark>` wraps matches, `…` marks truncation).
    /// Always a string, possibly empty.
    pub snippet: String,
}


/// Returned by `GET /api/search` and stored as-is in the result cache.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResponse {
    pub results: Vec<SearchResultItem>,
}

impl SearchResponse {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
