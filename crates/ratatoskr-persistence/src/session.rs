//! Write-through session cache over a [`Storage`] backend.

use ratatoskr_model::SessionId;

use crate::error::{PersistenceError, Result};
use crate::record::{LoadOutcome, PersistedRecord, RecordUpdate};
use crate::storage::Storage;

/// The selection record for one page session.
///
/// Loading never fails: anything other than a valid record for this session
/// yields a fresh empty record, which is not written back until the first
/// [`update`](Self::update).
#[derive(Debug)]
pub struct PersistedSession<S: Storage> {
    storage: S,
    key: String,
    record: PersistedRecord,
    outcome: LoadOutcome,
}

impl<S: Storage> PersistedSession<S> {
    pub fn load(storage: S, key: impl Into<String>, session_id: &SessionId) -> Self {
        let key = key.into();
        let (record, outcome) = match storage.get_item(&key) {
            Ok(Some(raw)) => match PersistedRecord::restore(&raw, session_id) {
                Ok(record) => (record, LoadOutcome::Restored),
                Err(rejection) => (
                    PersistedRecord::fresh(session_id),
                    LoadOutcome::Rejected(rejection),
                ),
            },
            Ok(None) => (PersistedRecord::fresh(session_id), LoadOutcome::Missing),
            Err(e) => (
                PersistedRecord::fresh(session_id),
                LoadOutcome::Unreadable(e.to_string()),
            ),
        };

        match &outcome {
            LoadOutcome::Restored => tracing::debug!(
                key = %key,
                session = %session_id,
                tags = record.selected_tags.len(),
                groups = record.opened_groups.len(),
                "restored selection"
            ),
            LoadOutcome::Missing => {
                tracing::debug!(key = %key, session = %session_id, "no stored selection");
            }
            LoadOutcome::Unreadable(reason) => {
                tracing::debug!(key = %key, %reason, "storage unreadable, starting fresh");
            }
            LoadOutcome::Rejected(rejection) => {
                tracing::debug!(key = %key, %rejection, "discarded stored selection");
            }
        }

        Self {
            storage,
            key,
            record,
            outcome,
        }
    }

    pub fn record(&self) -> &PersistedRecord {
        &self.record
    }

    pub fn outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Set one field and rewrite the whole record.
    ///
    /// The in-memory record keeps the change even when the write fails.
    pub fn update(&mut self, change: RecordUpdate) -> Result<()> {
        let field = change.field();
        self.record.apply(change);
        self.write()
            .inspect(|_| tracing::trace!(key = %self.key, field, "record written"))
    }

    fn write(&self) -> Result<()> {
        let json = serde_json::to_string(&self.record)
            .map_err(|e| PersistenceError::Serialization { source: e })?;
        self.storage.set_item(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordRejection;
    use crate::storage::MemoryStorage;

    const KEY: &str = "test-key";

    fn session(id: &str) -> SessionId {
        SessionId::new(id).unwrap()
    }

    #[test]
    fn cold_start_does_not_write() {
        let storage = MemoryStorage::new();
        let loaded = PersistedSession::load(storage.clone(), KEY, &session("1"));
        assert_eq!(loaded.outcome(), &LoadOutcome::Missing);
        assert_eq!(storage.write_count(), 0);
        assert_eq!(storage.get_item(KEY).unwrap(), None);
    }

    #[test]
    fn update_writes_entire_record() {
        let storage = MemoryStorage::new();
        let mut loaded = PersistedSession::load(storage.clone(), KEY, &session("1"));
        loaded
            .update(RecordUpdate::SelectedTags(vec!["g::a".to_string()]))
            .unwrap();
        loaded.update(RecordUpdate::ScrollY(40.0)).unwrap();

        let raw = storage.get_item(KEY).unwrap().unwrap();
        let stored = PersistedRecord::restore(&raw, &session("1")).unwrap();
        assert_eq!(stored.selected_tags, vec!["g::a"]);
        assert_eq!(stored.scroll_y, 40.0);
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn stale_record_is_replaced_not_merged() {
        let storage = MemoryStorage::new();
        storage
            .set_item(KEY, r#"{"messageId":"A","selectedTags":["x"],"scrollY":9}"#)
            .unwrap();

        let loaded = PersistedSession::load(storage.clone(), KEY, &session("B"));
        assert_eq!(loaded.record(), &PersistedRecord::fresh(&session("B")));
        assert!(matches!(
            loaded.outcome(),
            LoadOutcome::Rejected(RecordRejection::SessionMismatch { .. })
        ));
        // The stale record stays until the first update.
        assert!(storage.get_item(KEY).unwrap().unwrap().contains("\"A\""));
    }
}
