//! FILENAME: core/persistence/src/lib.rs
//! Snapshot persistence for the dashboard aggregation core.
//!
//! The full multi-cube state persists as one opaque JSON snapshot under a
//! single key, with a second key holding the ISO-8601 time of the last
//! successful save. Single-snapshot overwrite only; no history, no merge.

mod error;
mod store;

pub use error::{PersistenceError, StoreError};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use chrono::{DateTime, Utc};
use cube_engine::Snapshot;
use log::{debug, warn};

/// Store key holding the serialized snapshot.
pub const SNAPSHOT_KEY: &str = "dashboard_snapshot";

/// Store key holding the ISO-8601 timestamp of the last save.
pub const LAST_UPDATE_KEY: &str = "last_update";

/// Serializes the snapshot and writes it plus the last-update timestamp.
pub fn save_snapshot<S: KeyValueStore>(store: &S, snapshot: &Snapshot) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(snapshot)?;
    store.set(SNAPSHOT_KEY, &json)?;
    store.set(LAST_UPDATE_KEY, &Utc::now().to_rfc3339())?;
    debug!("snapshot saved ({} bytes)", json.len());
    Ok(())
}

/// Loads the persisted snapshot, if any.
///
/// Fields absent from an older snapshot (a fact table added in a later
/// schema) default to their empty shape via serde rather than failing.
pub fn load_snapshot<S: KeyValueStore>(store: &S) -> Result<Option<Snapshot>, PersistenceError> {
    match store.get(SNAPSHOT_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// When the snapshot was last saved. An unparseable timestamp reads as
/// absent rather than failing the page load.
pub fn last_update<S: KeyValueStore>(store: &S) -> Result<Option<DateTime<Utc>>, PersistenceError> {
    match store.get(LAST_UPDATE_KEY)? {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(&raw);
            if parsed.is_err() {
                warn!("ignoring unparseable last-update timestamp: {raw:?}");
            }
            Ok(parsed.ok().map(|t| t.with_timezone(&Utc)))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_empty_store() {
        let store = MemoryStore::new();
        assert!(load_snapshot(&store).unwrap().is_none());
        assert!(last_update(&store).unwrap().is_none());
    }

    #[test]
    fn test_save_writes_both_keys() {
        let store = MemoryStore::new();
        save_snapshot(&store, &Snapshot::default()).unwrap();
        assert!(store.get(SNAPSHOT_KEY).unwrap().is_some());
        assert!(last_update(&store).unwrap().is_some());
    }

    #[test]
    fn test_garbled_timestamp_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(LAST_UPDATE_KEY, "not a timestamp").unwrap();
        assert!(last_update(&store).unwrap().is_none());
    }
}
