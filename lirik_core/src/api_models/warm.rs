use std::collections::BTreeMap;

use serde::Serialize;


/// Returned by `/api/warm-cache`: every warmed query mapped to its result count.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
pub struct WarmCacheResponse {
    pub ok: bool,

    pub warmed: BTreeMap<String, usize>,
}
