use std::collections::BTreeMap;

use crate::document::DocumentRecord;
use crate::error::{Result, SearchError};
use crate::DocumentId;

/// Document metadata plus insertion order for positional access.
#[derive(Debug, Default)]
pub struct DocumentStore {
    records: BTreeMap<DocumentId, DocumentRecord>,
    order: Vec<DocumentId>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.records.contains_key(&id)
    }

    /// Caller checks for duplicates first; re-inserting an id would desync `order`.
    pub(crate) fn insert(&mut self, id: DocumentId, record: DocumentRecord) {
        self.records.insert(id, record);
        self.order.push(id);
    }

    pub fn remove(&mut self, id: DocumentId) -> Option<DocumentRecord> {
        let record = self.records.remove(&id)?;
        self.order.retain(|&other| other != id);
        Some(record)
    }

    pub fn get(&self, id: DocumentId) -> Option<&DocumentRecord> {
        self.records.get(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub fn id_at(&self, index: usize) -> Result<DocumentId> {
        self.order
            .get(index)
            .copied()
            .ok_or(SearchError::IndexOutOfRange { index, count: self.order.len() })
    }

    pub fn ids(&self) -> std::iter::Copied<std::slice::Iter<'_, DocumentId>> {
        self.order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentStatus;

    fn record(rating: i32) -> DocumentRecord {
        DocumentRecord { rating, status: DocumentStatus::Actual }
    }

    #[test]
    fn keeps_insertion_order() {
        let mut store = DocumentStore::new();
        store.insert(5, record(1));
        store.insert(2, record(2));
        store.insert(9, record(3));
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![5, 2, 9]);
        assert_eq!(store.id_at(1).unwrap(), 2);
    }

    #[test]
    fn id_at_out_of_range() {
        let mut store = DocumentStore::new();
        store.insert(1, record(0));
        assert_eq!(
            store.id_at(1).unwrap_err(),
            SearchError::IndexOutOfRange { index: 1, count: 1 }
        );
    }

    #[test]
    fn remove_drops_from_order() {
        let mut store = DocumentStore::new();
        store.insert(1, record(0));
        store.insert(2, record(0));
        assert!(store.remove(1).is_some());
        assert!(store.remove(1).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.id_at(0).unwrap(), 2);
        assert!(!store.contains(1));
    }
}
