mod model;
mod mutation;
mod query;
mod search;

pub use model::*;
pub use mutation::*;
pub use query::*;
pub use search::*;
