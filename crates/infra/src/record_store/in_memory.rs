use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value as JsonValue;

use bengkel_core::RecordId;

use super::{Record, RecordStore, StoreError};

const ID_KEY: &str = "id";
const CREATED_AT_KEY: &str = "createdAt";

/// In-memory record store for tests/dev.
///
/// Records keep insertion order. Writes are last-write-wins under a single
/// `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Vec<Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `records` (see [`Self::insert`]).
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Result<Self, StoreError> {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Load a JSON array of record objects from `path`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Backend(format!("reading {}: {e}", path.display())))?;
        let records: Vec<Record> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Backend(format!("parsing {}: {e}", path.display())))?;

        let store = Self::with_records(records)?;
        tracing::info!(path = %path.display(), records = store.len(), "seeded in-memory record store");
        Ok(store)
    }

    /// Add a record, assigning `id` and `createdAt` when it has none.
    pub fn insert(&self, mut record: Record) -> Result<RecordId, StoreError> {
        let id = match record.get(ID_KEY).and_then(JsonValue::as_str) {
            Some(existing) => RecordId::new(existing).map_err(|e| StoreError::Backend(e.to_string()))?,
            None => RecordId::generate(),
        };
        record.insert(ID_KEY.to_string(), JsonValue::String(id.to_string()));
        record
            .entry(CREATED_AT_KEY)
            .or_insert_with(|| JsonValue::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)));

        let mut records = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if records.iter().any(|r| matches_id(r, &id)) {
            return Err(StoreError::Backend(format!("duplicate id: {id}")));
        }
        records.push(record);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn matches_id(record: &Record, id: &RecordId) -> bool {
    record.get(ID_KEY).and_then(JsonValue::as_str) == Some(id.as_str())
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_many(&self) -> Result<Vec<Record>, StoreError> {
        let records = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    async fn update(&self, id: &RecordId, mut patch: Record) -> Result<Option<Record>, StoreError> {
        // Identity is immutable.
        patch.remove(ID_KEY);

        let mut records = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let Some(record) = records.iter_mut().find(|r| matches_id(r, id)) else {
            return Ok(None);
        };

        for (key, value) in patch {
            record.insert(key, value);
        }
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &RecordId) -> Result<bool, StoreError> {
        let mut records = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let before = records.len();
        records.retain(|r| !matches_id(r, id));
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: JsonValue) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn id(s: &str) -> RecordId {
        RecordId::new(s).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_id_and_created_at() {
        let store = InMemoryRecordStore::new();
        let assigned = store.insert(record(json!({"invoice": "INV-1"}))).unwrap();

        let all = store.find_many().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["id"], json!(assigned.as_str()));
        assert!(all[0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn find_many_preserves_insertion_order() {
        let store = InMemoryRecordStore::with_records(vec![
            record(json!({"id": "b"})),
            record(json!({"id": "a"})),
            record(json!({"id": "c"})),
        ])
        .unwrap();

        let ids: Vec<_> = store
            .find_many()
            .await
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let store = InMemoryRecordStore::new();
        store.insert(record(json!({"id": "x"}))).unwrap();
        let err = store.insert(record(json!({"id": "x"}))).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn update_merges_fields_and_keeps_id() {
        let store = InMemoryRecordStore::with_records(vec![record(json!({"id": "x", "stock": 1, "invoice": "A"}))]).unwrap();

        let updated = store
            .update(&id("x"), record(json!({"stock": 5, "id": "hijack"})))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated["id"], json!("x"));
        assert_eq!(updated["stock"], json!(5));
        assert_eq!(updated["invoice"], json!("A"));
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let store = InMemoryRecordStore::new();
        let res = store.update(&id("nope"), Record::new()).await.unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryRecordStore::with_records(vec![record(json!({"id": "x"}))]).unwrap();

        assert!(store.delete(&id("x")).await.unwrap());
        assert!(!store.delete(&id("x")).await.unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn from_json_file_loads_records() {
        let path = std::env::temp_dir().join(format!("bengkel-seed-{}.json", RecordId::generate()));
        std::fs::write(&path, r#"[{"id": "s1", "invoice": "INV-1", "retailName": "Oli"}]"#).unwrap();

        let store = InMemoryRecordStore::from_json_file(&path).unwrap();
        assert_eq!(store.len(), 1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn from_json_file_reports_missing_file() {
        let err = InMemoryRecordStore::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
