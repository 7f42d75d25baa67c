//! In-process patient store

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::patient::Patient;
use crate::store::PatientStore;

/// Insertion-ordered store kept in memory.
///
/// `save` is create-or-replace: a patient without an id gets the next free
/// `p{n}`, a known id is replaced in place, an unknown id is appended.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<Patient>,
    last_seq: u64,
}

impl Inner {
    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|p| p.id() == Some(id))
    }

    fn next_id(&mut self) -> String {
        loop {
            self.last_seq += 1;
            let candidate = format!("p{}", self.last_seq);
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Patient>> {
        Ok(self.read()?.records.clone())
    }

    async fn get(&self, id: &str) -> StoreResult<Patient> {
        let inner = self.read()?;
        inner
            .position(id)
            .map(|idx| inner.records[idx].clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn save(&self, mut patient: Patient) -> StoreResult<Patient> {
        let mut inner = self.write()?;

        let id = match patient.id() {
            Some(id) => id.to_string(),
            None => inner.next_id(),
        };
        patient.set_id(id.as_str());

        match inner.position(&id) {
            Some(idx) => inner.records[idx] = patient.clone(),
            None => inner.records.push(patient.clone()),
        }

        Ok(patient)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.write()?;
        match inner.position(id) {
            Some(idx) => {
                inner.records.remove(idx);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(name: &str) -> Patient {
        serde_json::from_value(json!({ "name": name })).unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let ana = store.save(named("Ana")).await.unwrap();
        let ben = store.save(named("Ben")).await.unwrap();

        assert_eq!(ana.id(), Some("p1"));
        assert_eq!(ben.id(), Some("p2"));
        assert_eq!(store.len(), Ok(2));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryStore::new();
        for name in ["Ana", "Ben", "Cai"] {
            store.save(named(name)).await.unwrap();
        }
        // Replacing a record must not move it
        store.save(named("Ben Two").with_id("p2")).await.unwrap();

        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.fields["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Ana", "Ben Two", "Cai"]);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_appends() {
        let store = MemoryStore::new();
        let saved = store.save(named("Dee").with_id("custom")).await.unwrap();
        assert_eq!(saved.id(), Some("custom"));
        assert_eq!(store.get("custom").await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_generated_ids_skip_taken_ones() {
        let store = MemoryStore::new();
        store.save(named("Taken").with_id("p1")).await.unwrap();
        let fresh = store.save(named("Fresh")).await.unwrap();
        assert_eq!(fresh.id(), Some("p2"));
        assert_eq!(store.len(), Ok(2));
    }

    #[test]
    fn test_poisoned_lock_surfaces_as_backend_error() {
        let store = MemoryStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.inner.write().unwrap();
            panic!("writer died");
        }));

        assert!(matches!(store.len(), Err(StoreError::Backend(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(
            store.get("nope").await,
            Err(StoreError::NotFound("nope".to_string()))
        );
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryStore::new();
        let saved = store.save(named("Ana")).await.unwrap();
        let id = saved.id().unwrap();

        assert_eq!(store.delete(id).await, Ok(()));
        assert_eq!(
            store.delete(id).await,
            Err(StoreError::NotFound(id.to_string()))
        );
        assert_eq!(store.is_empty(), Ok(true));
    }
}
