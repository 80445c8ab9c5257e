//! Append-only log of administrative actions.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::store::SharedKeyValueStore;


#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Upsert,
    Delete,
    Reindex,
    Session,
}


#[derive(Serialize, Debug)]
struct AuditEntry<'a> {
    action: AuditAction,

    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<&'a serde_json::Value>,

    ts: &'a str,
}


/// Writes `audit:<timestamp>:<uuid>` entries into its own key-value store.
///
/// Without a store, actions are only logged through `tracing`.
pub struct AuditLog {
    store: Option<SharedKeyValueStore>,
}

impl AuditLog {
    pub fn new(store: Option<SharedKeyValueStore>) -> Self {
        Self { store }
    }

    /// Records an action. Returns the key the entry was written under, if it was written.
    pub async fn record(
        &self,
        action: AuditAction,
        payload: Option<serde_json::Value>,
    ) -> Option<String> {
        info!(action = ?action, payload = ?payload, "Admin action.");

        let store = self.store.as_ref()?;

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let key = format!("audit:{}:{}", timestamp, uuid::Uuid::new_v4());

        let entry = AuditEntry {
            action,
            payload: payload.as_ref(),
            ts: &timestamp,
        };

        let serialized_entry = match serde_json::to_string(&entry) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(error = %error, "Failed to serialize audit log entry.");
                return None;
            }
        };

        match store.put(&key, serialized_entry, None).await {
            Ok(()) => Some(key),
            Err(error) => {
                warn!(error = %error, key, "Failed to write audit log entry.");
                None
            }
        }
    }
}



#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{
        store::{InMemoryKeyValueStore, KeyValueStore},
        testing::FailingKeyValueStore,
    };

    #[tokio::test]
    async fn writes_entries_with_action_payload_and_timestamp() {
        let store = Arc::new(InMemoryKeyValueStore::new(16));
        let audit_log = AuditLog::new(Some(store.clone()));

        let key = audit_log
            .record(
                AuditAction::Upsert,
                Some(json!({ "slug": "bapa", "title": "Bapa" })),
            )
            .await
            .unwrap();

        assert!(key.starts_with("audit:"));

        let entry: serde_json::Value =
            serde_json::from_str(&store.get(&key).await.unwrap().unwrap()).unwrap();

        assert_eq!(entry["action"], "upsert");
        assert_eq!(entry["payload"]["slug"], "bapa");
        assert!(entry["ts"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn omits_missing_payload() {
        let store = Arc::new(InMemoryKeyValueStore::new(16));
        let audit_log = AuditLog::new(Some(store.clone()));

        let key = audit_log
            .record(AuditAction::Reindex, None)
            .await
            .unwrap();

        let entry: serde_json::Value =
            serde_json::from_str(&store.get(&key).await.unwrap().unwrap()).unwrap();

        assert_eq!(entry["action"], "reindex");
        assert!(entry.get("payload").is_none());
    }

    #[tokio::test]
    async fn entries_are_kept_past_the_store_capacity() {
        let store = Arc::new(InMemoryKeyValueStore::new(4));
        let audit_log = AuditLog::new(Some(store.clone()));

        let mut keys = Vec::new();
        for _ in 0..6 {
            keys.push(audit_log.record(AuditAction::Session, None).await.unwrap());
        }

        store
            .put("search:kasih", "{}".to_string(), Some(300))
            .await
            .unwrap();

        for key in &keys {
            assert!(store.get(key).await.unwrap().is_some());
        }
        assert_eq!(store.len(), 6);
    }

    #[tokio::test]
    async fn failures_and_missing_store_are_silent() {
        assert_eq!(
            AuditLog::new(Some(Arc::new(FailingKeyValueStore)))
                .record(AuditAction::Session, None)
                .await,
            None
        );
        assert_eq!(
            AuditLog::new(None)
                .record(AuditAction::Delete, None)
                .await,
            None
        );
    }
}
