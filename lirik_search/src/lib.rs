//! Search and cache service of the lyrics site.
//!
//! A search request flows through the [`normalizer`] (query and filter parsing),
//! the [`cache_key`] builder and the [`cache`] (backed by any [`store::KeyValueStore`])
//! before falling through to the full-text query in `lirik_database`.
//! The [`service`] module ties these together; [`warmer`], [`views`] and [`audit`]
//! are the other users of the key-value store.

pub mod audit;
pub mod cache;
pub mod cache_key;
pub mod normalizer;
pub mod service;
pub mod store;
pub mod views;
pub mod warmer;

#[cfg(test)]
pub(crate) mod testing;
