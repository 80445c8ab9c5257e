//! This crate contains all configuration-relevant code, including
//! the full configuration structure as well as methods needed to load
//! and validate it.
//!
//! Your starting point should probably be [`Configuration::load_from_default_path`].
//!
//! # Internals
//! The entire configuration structure is based on the concept of
//! unvalidated ("unresolved") and validated configuration structures.
//!
//! Even though we're interacting with [`Configuration`],
//! it internally attempts to load the configuration file and deserialize it
//! into the `UnresolvedConfiguration` structure.
//! It will then call its `try_resolve_with_context` method, which will recursively turn it
//! (and its fields) into validated ("resolved") versions.
//!
//! The output will then be the [`Configuration`]. This way we can implement any
//! additional configuration validation while resolving, e.g. raising an error
//! if the public site URL doesn't parse.

#![allow(rustdoc::private_intra_doc_links)]

mod environment;
mod error;
mod structure;
mod traits;
mod utilities;

pub use environment::*;
pub use error::*;
pub use structure::*;
