//! Event Store - In-memory event index
//!
//! The EventStore owns the identifier-to-record mapping shared by all
//! requests. A single mutex guards the collection so that the
//! lookup-and-mutate of one upsert never interleaves with another
//! operation on the same identifier.

use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;

use crate::types::{EventRecord, MirrorStatus};

/// In-memory event index with upsert and snapshot-list operations.
///
/// Records are held in insertion order; `list` sorts into a fresh vector
/// and never reorders the stored collection.
pub struct EventStore {
    records: Mutex<Vec<EventRecord>>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Create a record for `id`, or replace an existing record's
    /// date/details in place.
    ///
    /// Returns the resulting record and whether it was newly created.
    /// On update the original `created_at` is preserved and any previous
    /// mirror annotation is cleared; `updated_at` is always set to now.
    /// Input validation is the caller's job - the store assumes the
    /// fields are present and well-formed.
    pub fn upsert(&self, id: &str, date: String, details: Value) -> (EventRecord, bool) {
        let mut records = self.records.lock();
        let now = Utc::now();

        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.date = date;
            record.details = details;
            record.updated_at = now;
            record.mirror = None;
            (record.clone(), false)
        } else {
            let record = EventRecord {
                id: id.to_string(),
                date,
                details,
                created_at: now,
                updated_at: now,
                mirror: None,
            };
            records.push(record.clone());
            (record, true)
        }
    }

    /// Snapshot of every record, ordered by creation time descending
    /// (most recently created first).
    ///
    /// The sort is stable, so records created in the same instant keep
    /// their insertion order.
    pub fn list(&self) -> Vec<EventRecord> {
        let records = self.records.lock();
        let mut snapshot: Vec<EventRecord> = records.clone();
        snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        snapshot
    }

    /// Overwrite the mirror annotation on the record for `id` with the
    /// outcome of the most recent mirror attempt.
    ///
    /// Timestamps are untouched. Returns the annotated record, or `None`
    /// if no record exists for `id`.
    pub fn record_mirror(&self, id: &str, status: MirrorStatus) -> Option<EventRecord> {
        let mut records = self.records.lock();
        let record = records.iter_mut().find(|r| r.id == id)?;
        record.mirror = Some(status);
        Some(record.clone())
    }

    /// Look up a single record by identifier
    pub fn get(&self, id: &str) -> Option<EventRecord> {
        self.records.lock().iter().find(|r| r.id == id).cloned()
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    #[test]
    fn test_upsert_new_identifier_creates() {
        let store = EventStore::new();

        let (record, was_created) = store.upsert("e1", "2024-01-01".to_string(), json!({"note": "x"}));

        assert!(was_created);
        assert_eq!(record.id, "e1");
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.mirror.is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_upsert_existing_identifier_updates() {
        let store = EventStore::new();

        let (first, _) = store.upsert("e1", "2024-01-01".to_string(), json!({"note": "x"}));
        let (second, was_created) =
            store.upsert("e1", "2024-02-02".to_string(), json!({"note": "y"}));

        assert!(!was_created);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(second.date, "2024-02-02");
        assert_eq!(second.details["note"], "y");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_upsert_clears_previous_mirror_annotation() {
        let store = EventStore::new();

        store.upsert("e1", "2024-01-01".to_string(), json!({}));
        store.record_mirror(
            "e1",
            MirrorStatus::Stored {
                cloud_storage_file: "events/event_e1_1.json".to_string(),
            },
        );

        let (record, _) = store.upsert("e1", "2024-01-02".to_string(), json!({}));
        assert!(record.mirror.is_none());
    }

    #[test]
    fn test_upsert_does_not_affect_other_records() {
        let store = EventStore::new();

        store.upsert("e1", "2024-01-01".to_string(), json!({"note": "a"}));
        store.upsert("e2", "2024-01-02".to_string(), json!({"note": "b"}));
        store.upsert("e1", "2024-01-03".to_string(), json!({"note": "c"}));

        let e2 = store.get("e2").unwrap();
        assert_eq!(e2.date, "2024-01-02");
        assert_eq!(e2.details["note"], "b");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_list_returns_each_identifier_once() {
        let store = EventStore::new();

        for i in 0..5 {
            store.upsert(&format!("e{}", i), "2024-01-01".to_string(), json!({}));
        }
        // Repeated writes to one identifier must not duplicate it
        store.upsert("e3", "2024-01-02".to_string(), json!({}));
        store.upsert("e3", "2024-01-03".to_string(), json!({}));

        let listed = store.list();
        assert_eq!(listed.len(), 5);
        assert_eq!(listed.iter().filter(|r| r.id == "e3").count(), 1);
    }

    #[test]
    fn test_list_orders_by_created_at_descending() {
        let store = EventStore::new();

        store.upsert("e1", "2024-01-01".to_string(), json!({}));
        store.upsert("e2", "2024-01-02".to_string(), json!({}));
        store.upsert("e3", "2024-01-03".to_string(), json!({}));

        // Force distinct creation times so the ordering is unambiguous
        {
            let mut records = store.records.lock();
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            for (i, record) in records.iter_mut().enumerate() {
                record.created_at = base + Duration::seconds(i as i64);
                record.updated_at = record.created_at;
            }
        }

        let listed = store.list();
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["e3", "e2", "e1"]);
    }

    #[test]
    fn test_list_ties_keep_insertion_order() {
        let store = EventStore::new();

        store.upsert("e1", "2024-01-01".to_string(), json!({}));
        store.upsert("e2", "2024-01-01".to_string(), json!({}));
        store.upsert("e3", "2024-01-01".to_string(), json!({}));

        // Collapse all creation times onto one instant
        {
            let mut records = store.records.lock();
            let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            for record in records.iter_mut() {
                record.created_at = instant;
                record.updated_at = instant;
            }
        }

        let listed = store.list();
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
    }

    #[test]
    fn test_list_does_not_reorder_stored_records() {
        let store = EventStore::new();

        store.upsert("e1", "2024-01-01".to_string(), json!({}));
        store.upsert("e2", "2024-01-02".to_string(), json!({}));

        {
            let mut records = store.records.lock();
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            records[0].created_at = base;
            records[1].created_at = base + Duration::seconds(1);
        }

        let _ = store.list();

        // Stored order is still insertion order, not the sorted order
        let records = store.records.lock();
        assert_eq!(records[0].id, "e1");
        assert_eq!(records[1].id, "e2");
    }

    #[test]
    fn test_record_mirror_overwrites_and_preserves_timestamps() {
        let store = EventStore::new();

        let (record, _) = store.upsert("e1", "2024-01-01".to_string(), json!({}));

        let annotated = store
            .record_mirror(
                "e1",
                MirrorStatus::Failed {
                    cloud_storage_error: "Failed to save to cloud storage".to_string(),
                },
            )
            .unwrap();
        assert_eq!(annotated.created_at, record.created_at);
        assert_eq!(annotated.updated_at, record.updated_at);

        let annotated = store
            .record_mirror(
                "e1",
                MirrorStatus::Stored {
                    cloud_storage_file: "events/event_e1_2.json".to_string(),
                },
            )
            .unwrap();
        assert_eq!(
            annotated.mirror,
            Some(MirrorStatus::Stored {
                cloud_storage_file: "events/event_e1_2.json".to_string()
            })
        );
    }

    #[test]
    fn test_record_mirror_unknown_identifier() {
        let store = EventStore::new();
        let annotated = store.record_mirror(
            "missing",
            MirrorStatus::Failed {
                cloud_storage_error: "x".to_string(),
            },
        );
        assert!(annotated.is_none());
    }
}
