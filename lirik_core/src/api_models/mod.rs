//! Request and response models of the HTTP API.
//!
//! Response models always implement [`Serialize`](serde::Serialize) and request models
//! always implement [`Deserialize`](serde::Deserialize). The opposite directions are only
//! implemented when the `serde_impls_for_client_on_models` feature is enabled.
//! [`SearchResponse`] is an exception: it is cached as JSON, so it implements both.

mod error_reason;
mod health;
mod search;
mod song;
mod songs;
mod stats;
mod warm;

pub use error_reason::*;
pub use health::*;
pub use search::*;
pub use song::*;
pub use songs::*;
pub use stats::*;
pub use warm::*;
