use async_trait::async_trait;
use codemint_core::store::Result;
use codemint_core::{Code, CodeRecord, CodeStore, StoreError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory implementation of [`CodeStore`] using DashMap.
///
/// The conditional insert goes through a single `entry` call, so concurrent
/// writers proposing the same code observe at-most-one-winner semantics
/// without an outer lock. Clones share the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<DashMap<String, CodeRecord>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the record stored under `code`.
    ///
    /// Not part of [`CodeStore`]; used by administrative tooling and tests.
    pub fn get(&self, code: &Code) -> Option<CodeRecord> {
        self.storage
            .get(code.as_str())
            .map(|entry| entry.value().clone())
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl CodeStore for InMemoryStore {
    async fn put_if_absent(&self, code: &Code, record: CodeRecord) -> Result<()> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(code.as_str().to_owned())),
            Entry::Vacant(vacant) => {
                vacant.insert(record);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn code(s: &str) -> Code {
        Code::new_unchecked(s)
    }

    fn record(used_by: Option<&str>) -> CodeRecord {
        CodeRecord {
            created_on: Timestamp::now(),
            used_by: used_by.map(str::to_owned),
            reference: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let store = InMemoryStore::new();

        store
            .put_if_absent(&code("7Y2KQ0ZD"), record(Some("checkout")))
            .await
            .unwrap();

        let stored = store.get(&code("7Y2KQ0ZD")).unwrap();
        assert_eq!(stored.used_by.as_deref(), Some("checkout"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = InMemoryStore::new();

        assert!(store.get(&code("MISSING1")).is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn insert_conflict_keeps_first_record() {
        let store = InMemoryStore::new();

        store
            .put_if_absent(&code("7Y2KQ0ZD"), record(Some("first")))
            .await
            .unwrap();

        let err = store
            .put_if_absent(&code("7Y2KQ0ZD"), record(Some("second")))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        let stored = store.get(&code("7Y2KQ0ZD")).unwrap();
        assert_eq!(stored.used_by.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn concurrent_distinct_codes_all_succeed() {
        let store = InMemoryStore::new();
        let mut handles = vec![];

        for i in 0..10u64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let c = Code::new_unchecked(format!("CODE{:04}", i));
                store.put_if_absent(&c, record(None)).await.unwrap();
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 10);
    }

    #[tokio::test]
    async fn concurrent_same_code_has_single_winner() {
        let store = InMemoryStore::new();
        let mut handles = vec![];

        for i in 0..16u64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let winner = format!("caller-{i}");
                store
                    .put_if_absent(&code("RACE0001"), record(Some(winner.as_str())))
                    .await
                    .is_ok()
            }));
        }

        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap() {
                wins += 1;
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(store.len(), 1);
    }
}
