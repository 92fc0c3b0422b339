//! The donation store.
//!
//! [`DonationStore`] owns the ordered donation list and is the only thing that
//! mutates it. Every mutation rewrites the whole list to the store's slot.

use std::collections::HashSet;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::donation::{DonationRecord, NewDonation};
use crate::error::{Error, Result};
use crate::storage::SlotBackend;

/// Default key of the slot holding the donation list.
pub const DEFAULT_SLOT_KEY: &str = "donations.v1";

/// The canonical, most-recent-first list of donations.
#[derive(Debug)]
pub struct DonationStore<B> {
    backend: B,
    key: String,
    records: Vec<DonationRecord>,
}

impl<B: SlotBackend> DonationStore<B> {
    /// Create a store over `backend` and load whatever `key` holds.
    pub fn open(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let records = load(&backend, &key);
        info!("Loaded {} donations from slot {}", records.len(), key);
        Self {
            backend,
            key,
            records,
        }
    }

    /// All donations, newest first.
    #[must_use]
    pub fn records(&self) -> &[DonationRecord] {
        &self.records
    }

    /// Look up a donation by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DonationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of donations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no donations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The slot key this store persists to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Give back the storage backend.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Store a new donation at the front of the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PersistenceFailure`] if the list cannot be written. The
    /// donation stays in memory regardless.
    pub fn add(&mut self, donation: NewDonation) -> Result<DonationRecord> {
        let record = DonationRecord::new(self.fresh_id(), donation);
        debug!("Adding donation {}", record.id);
        self.records.insert(0, record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Replace every field but the id of an existing donation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no donation has `id`, or
    /// [`Error::PersistenceFailure`] if the list cannot be written.
    pub fn update(&mut self, id: &str, donation: NewDonation) -> Result<DonationRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found(id))?;
        record.apply(donation);
        let updated = record.clone();
        debug!("Updated donation {}", id);
        self.persist()?;
        Ok(updated)
    }

    /// Delete a donation, reporting whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PersistenceFailure`] if the list cannot be written.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            debug!("Removed donation {}", id);
        } else {
            debug!("No donation {} to remove", id);
        }
        self.persist()?;
        Ok(removed)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.records)?;
        self.backend
            .set(&self.key, &blob)
            .map_err(|e| Error::persistence_failure(&self.key, e))
    }
}

/// Read the donation list from `key`, degrading to empty on any problem.
fn load(backend: &impl SlotBackend, key: &str) -> Vec<DonationRecord> {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Could not read slot {}: {}; starting empty", key, e);
            return Vec::new();
        }
    };

    let records: Vec<DonationRecord> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("Slot {} does not hold a donation list: {}; starting empty", key, e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    for record in &records {
        if let Err(reason) = record.check() {
            warn!("Slot {} holds an invalid donation ({}); starting empty", key, reason);
            return Vec::new();
        }
        if !seen.insert(record.id.as_str()) {
            warn!("Slot {} holds duplicate id {}; starting empty", key, record.id);
            return Vec::new();
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donation::DonationType;
    use crate::storage::{MemoryBackend, SqliteBackend};

    /// Accepts reads, refuses every write.
    #[derive(Debug, Default)]
    struct FailingBackend;

    impl SlotBackend for FailingBackend {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::DatabaseQuery(rusqlite::Error::InvalidQuery))
        }
    }

    fn create_test_store() -> DonationStore<MemoryBackend> {
        DonationStore::open(MemoryBackend::new(), DEFAULT_SLOT_KEY)
    }

    fn donation(donor: &str, donation_type: DonationType, value: f64) -> NewDonation {
        NewDonation {
            donor: donor.to_string(),
            donation_type,
            value,
            date: "2024-01-01".to_string(),
        }
    }

    fn assert_unique_ids(store: &DonationStore<impl SlotBackend>) {
        let ids: HashSet<_> = store.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_open_empty() {
        let store = create_test_store();
        assert!(store.is_empty());
        assert_eq!(store.key(), DEFAULT_SLOT_KEY);
    }

    #[test]
    fn test_add_prepends() {
        let mut store = create_test_store();
        let first = store.add(donation("Ann", DonationType::Food, 3.0)).unwrap();
        let second = store.add(donation("Bob", DonationType::Toys, 2.0)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0], second);
        assert_eq!(store.records()[1], first);
        assert_eq!(store.records()[0].donor, "Bob");
        assert!(!second.id.is_empty());
    }

    #[test]
    fn test_add_persists() {
        let mut store = create_test_store();
        store.add(donation("Ann", DonationType::Food, 3.0)).unwrap();

        let raw = store.backend().get(DEFAULT_SLOT_KEY).unwrap().unwrap();
        let stored: Vec<DonationRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, store.records());
    }

    #[test]
    fn test_update_preserves_position_and_id() {
        let mut store = create_test_store();
        let a = store.add(donation("Ann", DonationType::Food, 3.0)).unwrap();
        let b = store.add(donation("Bob", DonationType::Toys, 2.0)).unwrap();
        let c = store.add(donation("Cy", DonationType::Other, 1.0)).unwrap();

        let updated = store
            .update(&b.id, donation("Bobby", DonationType::Money, 25.0))
            .unwrap();

        assert_eq!(updated.id, b.id);
        assert_eq!(store.records()[1], updated);
        assert_eq!(store.records()[1].donor, "Bobby");
        assert_eq!(store.records()[0], c);
        assert_eq!(store.records()[2], a);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = create_test_store();
        store.add(donation("Ann", DonationType::Food, 3.0)).unwrap();
        let writes = store.backend().writes();

        let err = store
            .update("missing", donation("X", DonationType::Food, 1.0))
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.backend().writes(), writes);
        assert_eq!(store.records()[0].donor, "Ann");
    }

    #[test]
    fn test_remove_existing() {
        let mut store = create_test_store();
        let a = store.add(donation("Ann", DonationType::Food, 3.0)).unwrap();
        store.add(donation("Bob", DonationType::Toys, 2.0)).unwrap();

        assert!(store.remove(&a.id).unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.get(&a.id).is_none());
    }

    #[test]
    fn test_remove_nonexistent_leaves_sequence() {
        let mut store = create_test_store();
        store.add(donation("Ann", DonationType::Food, 3.0)).unwrap();
        let before = store.records().to_vec();

        assert!(!store.remove("no-such-id").unwrap());
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_ids_unique_across_mutations() {
        let mut store = create_test_store();
        let mut ids = Vec::new();
        for i in 0..20 {
            let r = store
                .add(donation(&format!("donor {i}"), DonationType::Food, 1.0))
                .unwrap();
            ids.push(r.id);
        }
        for id in ids.iter().step_by(3) {
            store.remove(id).unwrap();
        }
        for id in ids.iter().skip(1).step_by(4) {
            let _ = store.update(id, donation("changed", DonationType::Toys, 2.0));
        }
        for _ in 0..5 {
            store.add(donation("late", DonationType::Money, 5.0)).unwrap();
        }

        assert_unique_ids(&store);
    }

    #[test]
    fn test_round_trip_through_backend() {
        let mut store = create_test_store();
        store.add(donation("Ann", DonationType::Food, 3.0)).unwrap();
        store.add(donation("Bob", DonationType::Money, 12.5)).unwrap();
        store.add(donation("Cy", DonationType::Clothing, 4.0)).unwrap();
        let expected = store.records().to_vec();

        let reopened = DonationStore::open(store.into_backend(), DEFAULT_SLOT_KEY);
        assert_eq!(reopened.records(), expected.as_slice());
    }

    #[test]
    fn test_round_trip_through_sqlite() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let mut store = DonationStore::open(backend, DEFAULT_SLOT_KEY);
        store.add(donation("Ann", DonationType::Toys, 7.0)).unwrap();
        store.add(donation("Bob", DonationType::Money, 50.0)).unwrap();
        let expected = store.records().to_vec();

        let reopened = DonationStore::open(store.into_backend(), DEFAULT_SLOT_KEY);
        assert_eq!(reopened.records(), expected.as_slice());
    }

    #[test]
    fn test_load_corrupted_blob_is_empty() {
        let backend = MemoryBackend::with_slot(DEFAULT_SLOT_KEY, "{not json");
        let store = DonationStore::open(backend, DEFAULT_SLOT_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let backend = MemoryBackend::with_slot(DEFAULT_SLOT_KEY, r#"{"donations": []}"#);
        let store = DonationStore::open(backend, DEFAULT_SLOT_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_invalid_record_is_empty() {
        let blob = r#"[{"id":"1","donor":"A","type":"food","value":0,"date":"2024-01-01"}]"#;
        let store = DonationStore::open(MemoryBackend::with_slot(DEFAULT_SLOT_KEY, blob), DEFAULT_SLOT_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_duplicate_ids_is_empty() {
        let blob = r#"[
            {"id":"1","donor":"A","type":"food","value":1,"date":"2024-01-01"},
            {"id":"1","donor":"B","type":"toys","value":2,"date":"2024-01-02"}
        ]"#;
        let store = DonationStore::open(MemoryBackend::with_slot(DEFAULT_SLOT_KEY, blob), DEFAULT_SLOT_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_valid_blob() {
        let blob = r#"[
            {"id":"b","donor":"B","type":"money","value":20,"date":"2024-01-02"},
            {"id":"a","donor":"A","type":"food","value":3,"date":"2024-01-01"}
        ]"#;
        let store = DonationStore::open(MemoryBackend::with_slot(DEFAULT_SLOT_KEY, blob), DEFAULT_SLOT_KEY);
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].id, "b");
        assert_eq!(store.get("a").map(|r| r.donation_type), Some(DonationType::Food));
    }

    #[test]
    fn test_other_slot_is_ignored() {
        let backend = MemoryBackend::with_slot("something.else", "[]");
        let store = DonationStore::open(backend, DEFAULT_SLOT_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_persistence_failure_keeps_memory() {
        let mut store = DonationStore::open(FailingBackend, DEFAULT_SLOT_KEY);

        let err = store
            .add(donation("Ann", DonationType::Food, 3.0))
            .unwrap_err();

        assert!(err.is_persistence_failure());
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].donor, "Ann");

        let id = store.records()[0].id.clone();
        let err = store.remove(&id).unwrap_err();
        assert!(err.is_persistence_failure());
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_persistence_failure_keeps_memory() {
        let mut store = DonationStore::open(FailingBackend, DEFAULT_SLOT_KEY);
        let _ = store.add(donation("Ann", DonationType::Food, 3.0));
        let _ = store.add(donation("Bo", DonationType::Toys, 1.0));
        let id = store.records()[1].id.clone();

        let err = store
            .update(&id, donation("Ann", DonationType::Money, 40.0))
            .unwrap_err();

        assert!(err.is_persistence_failure());
        assert_eq!(store.len(), 2);
        let kept = store.get(&id).unwrap();
        assert_eq!(kept.donation_type, DonationType::Money);
        assert_eq!(kept.value, 40.0);
        assert_eq!(store.records()[1].id, id);
    }
}
