//! In-memory record store.
//!
//! Owns the ordered record list and the id counter. Display order is
//! insertion order. Lookups that miss are silent no-ops: every mutating
//! operation reports whether it applied, and nothing here returns an error.

mod seed;

pub use seed::*;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::models::{FieldValue, PatientRecord, Pendiente, RecordField, RecordId};

/// Ordered list of patient records plus the next-id counter.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<PatientRecord>,
    next_id: RecordId,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Create an empty store. The first assigned id is 1.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// All records in display order.
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next added record will receive.
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    pub fn get(&self, id: RecordId) -> Option<&PatientRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: RecordId) -> Option<&mut PatientRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    fn allocate_id(&mut self) -> RecordId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a blank record dated today (UTC). Returns its id.
    pub fn add_record(&mut self) -> RecordId {
        self.add_record_on(chrono::Utc::now().date_naive())
    }

    /// Append a blank record with the given admission date. Returns its id.
    pub fn add_record_on(&mut self, date: NaiveDate) -> RecordId {
        let id = self.allocate_id();
        self.records.push(PatientRecord::blank(id, date));
        debug!(id, "record added");
        id
    }

    /// Append a fully built record, assigning it the next id.
    ///
    /// Any id already on `record` is overwritten.
    pub fn insert(&mut self, mut record: PatientRecord) -> RecordId {
        let id = self.allocate_id();
        record.id = id;
        self.records.push(record);
        id
    }

    /// Remove a record after `confirm` agrees.
    ///
    /// `confirm` is always asked first; a missing id is then a no-op. Returns
    /// true when a record was removed.
    pub fn delete_record<F>(&mut self, id: RecordId, confirm: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            debug!(id, "delete declined");
            return false;
        }
        self.remove(id)
    }

    /// Remove a record without asking. Returns true when one was removed.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            trace!(id, "delete: no such record");
            return false;
        };
        self.records.remove(pos);
        debug!(id, "record deleted");
        true
    }

    /// Overwrite one field of a record. The value is stored as given.
    pub fn update_field(&mut self, id: RecordId, field: RecordField, value: FieldValue) -> bool {
        let Some(record) = self.get_mut(id) else {
            trace!(id, %field, "update: no such record");
            return false;
        };
        let applied = record.set(field, value);
        if applied {
            debug!(id, %field, "field updated");
        } else {
            trace!(id, %field, "update: value kind does not fit field");
        }
        applied
    }

    /// Append an open checklist entry to a record.
    pub fn add_pendiente(&mut self, id: RecordId, text: impl Into<String>) -> bool {
        let Some(record) = self.get_mut(id) else {
            trace!(id, "add pendiente: no such record");
            return false;
        };
        record.pendientes.push(Pendiente::new(text));
        debug!(id, count = record.pendientes.len(), "pendiente added");
        true
    }

    /// Flip the completion flag of one checklist entry.
    pub fn toggle_pendiente(&mut self, id: RecordId, index: usize) -> bool {
        let Some(entry) = self
            .get_mut(id)
            .and_then(|record| record.pendientes.get_mut(index))
        else {
            trace!(id, index, "toggle: no such pendiente");
            return false;
        };
        entry.completed = !entry.completed;
        debug!(id, index, completed = entry.completed, "pendiente toggled");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_ids_increase_and_are_not_reused() {
        let mut store = RecordStore::new();
        let a = store.add_record_on(date());
        let b = store.add_record_on(date());
        assert_eq!((a, b), (1, 2));

        assert!(store.delete_record(b, || true));
        let c = store.add_record_on(date());
        assert_eq!(c, 3);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut store = RecordStore::new();
        let id = store.add_record_on(date());

        assert!(!store.delete_record(id, || false));
        assert!(store.get(id).is_some());

        assert!(store.delete_record(id, || true));
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_delete_missing_still_prompts() {
        let mut store = RecordStore::new();
        store.add_record_on(date());
        let mut asked = false;
        assert!(!store.delete_record(99, || {
            asked = true;
            true
        }));
        assert!(asked);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_field_stores_raw_value() {
        let mut store = RecordStore::new();
        let id = store.add_record_on(date());
        assert!(store.update_field(id, RecordField::Names, "ana".into()));
        assert_eq!(store.get(id).unwrap().names, "ana");
    }

    #[test]
    fn test_update_missing_record_is_noop() {
        let mut store = RecordStore::new();
        store.add_record_on(date());
        let before = store.records().to_vec();
        assert!(!store.update_field(5, RecordField::Names, "x".into()));
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn test_toggle_out_of_range() {
        let mut store = RecordStore::new();
        let id = store.add_record_on(date());
        assert!(!store.toggle_pendiente(id, 0));
        store.add_pendiente(id, "x");
        assert!(store.toggle_pendiente(id, 0));
        assert!(store.get(id).unwrap().pendientes[0].completed);
    }

    #[test]
    fn test_insert_assigns_fresh_id() {
        let mut store = RecordStore::new();
        let mut record = PatientRecord::blank(42, date());
        record.names = "x".into();
        let id = store.insert(record);
        assert_eq!(id, 1);
        assert_eq!(store.next_id(), 2);
    }
}
