use serde::Deserialize;

use crate::traits::Resolve;


#[derive(Deserialize, Debug, Clone)]
pub(super) struct UnresolvedCacheConfiguration {
    enabled: bool,

    max_entries: Option<usize>,

    audit_log_enabled: Option<bool>,
}

/// Key-value cache configuration (search results, view counters, audit log).
#[derive(Debug, Clone)]
pub struct CacheConfiguration {
    /// When disabled, searches always hit the database and view counts stay at zero.
    pub enabled: bool,

    /// Upper bound on entries held by the in-memory key-value store.
    pub max_entries: usize,

    pub audit_log_enabled: bool,
}

impl Resolve for UnresolvedCacheConfiguration {
    type Resolved = CacheConfiguration;

    fn resolve(self) -> Self::Resolved {
        Self::Resolved {
            enabled: self.enabled,
            max_entries: self.max_entries.unwrap_or(10_000),
            audit_log_enabled: self.audit_log_enabled.unwrap_or(true),
        }
    }
}
