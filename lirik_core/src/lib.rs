//! Types shared between the Lirik server, its search layer and its tooling:
//! identifiers, language codes, slug generation and the JSON API models.

pub mod api_models;
pub mod id;
pub mod language;
pub mod slug;
