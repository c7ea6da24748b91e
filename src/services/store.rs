use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use crate::error::StoreError;
use crate::model::document::{DocumentId, VocabDocument};

/// A document database collection that accepts set-semantics writes.
pub trait DocumentStore {
    /// Creates `collection/id`, or replaces its whole content if it exists.
    ///
    /// Blocks until the store acknowledges the write.
    fn set(&self, collection: &str, id: &DocumentId, document: &VocabDocument)
        -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    collections: HashMap<String, BTreeMap<DocumentId, VocabDocument>>,
    writes: Vec<(String, DocumentId)>,
}

/// In-process store keeping every collection in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, collection: &str, id: &DocumentId) -> Option<VocabDocument> {
        self.lock()
            .collections
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned()
    }

    /// Current content of `collection`, ordered by id.
    pub fn documents(&self, collection: &str) -> BTreeMap<DocumentId, VocabDocument> {
        self.lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Every accepted `set` call, in call order.
    pub fn writes(&self) -> Vec<(String, DocumentId)> {
        self.lock().writes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryStore {
    fn set(
        &self,
        collection: &str,
        id: &DocumentId,
        document: &VocabDocument,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document.clone());
        state.writes.push((collection.to_string(), id.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(word: &str, definition: &str) -> VocabDocument {
        VocabDocument {
            word: word.to_string(),
            definition: definition.to_string(),
        }
    }

    #[test]
    fn set_creates_then_replaces() {
        let store = MemoryStore::new();
        let id = DocumentId::from_word("AM/PM");

        store.set("Med_voca", &id, &doc("AM/PM", "")).unwrap();
        store.set("Med_voca", &id, &doc("AM-PM", "time")).unwrap();

        assert_eq!(store.get("Med_voca", &id), Some(doc("AM-PM", "time")));
        assert_eq!(store.documents("Med_voca").len(), 1);
        assert_eq!(store.writes().len(), 2);
    }

    #[test]
    fn collections_are_separate() {
        let store = MemoryStore::new();
        let id = DocumentId::from_word("fever");

        store.set("a", &id, &doc("fever", "hot")).unwrap();

        assert!(store.get("b", &id).is_none());
        assert!(store.documents("b").is_empty());
    }
}
