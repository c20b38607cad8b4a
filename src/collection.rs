// Owned in-memory collection with CRUD mutation handling

use crate::record::Record;
use eyre::{Result, eyre};
use tracing::debug;

/// Insertion-ordered record collection
///
/// The collection is the single mutation site for a list view. It is loaded
/// once (from a fetch or a record file), held for the view's lifetime, and
/// mutated locally on create/edit/delete; nothing is persisted. The query
/// engine reads it by reference and stays pure.
#[derive(Debug, Clone)]
pub struct Collection<T: Record> {
    records: Vec<T>,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    pub fn from_records(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Append a new record, assigning it the next free identifier
    ///
    /// Identifiers are `max(existing ids) + 1`, or 1 for an empty collection.
    pub fn create(&mut self, mut record: T) -> u64 {
        let id = self.records.iter().map(Record::id).max().unwrap_or(0) + 1;
        record.set_id(id);
        self.records.push(record);
        debug!(collection = T::collection_name(), id, "record created");
        id
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Replace the record with the matching id
    ///
    /// The replacement keeps the original id regardless of what the draft
    /// carries.
    pub fn update(&mut self, id: u64, mut record: T) -> Result<()> {
        let slot = self
            .records
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or_else(|| eyre!("No {} record with id {}", T::collection_name(), id))?;
        record.set_id(id);
        *slot = record;
        debug!(collection = T::collection_name(), id, "record updated");
        Ok(())
    }

    /// Remove the record with the matching id, returning it
    pub fn delete(&mut self, id: u64) -> Result<T> {
        let index = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| eyre!("No {} record with id {}", T::collection_name(), id))?;
        debug!(collection = T::collection_name(), id, "record deleted");
        Ok(self.records.remove(index))
    }

    /// Install a freshly fetched collection, discarding local state
    pub fn replace_all(&mut self, records: Vec<T>) {
        debug!(
            collection = T::collection_name(),
            count = records.len(),
            "collection replaced"
        );
        self.records = records;
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
