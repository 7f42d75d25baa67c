//! Patient store contract

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::patient::Patient;

/// Persistence collaborator behind the HTTP layer.
///
/// Whether `save` creates, replaces or upserts is decided by each
/// implementation; callers must not assume more than "the returned record is
/// what was stored".
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// All patients, in the store's own order.
    async fn list(&self) -> StoreResult<Vec<Patient>>;

    /// The patient with `id`, or `StoreError::NotFound(id)`.
    async fn get(&self, id: &str) -> StoreResult<Patient>;

    /// Persist `patient`, assigning an id if it has none.
    async fn save(&self, patient: Patient) -> StoreResult<Patient>;

    /// Remove the patient with `id`, or `StoreError::NotFound(id)`.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Cheap liveness check used by `/health`.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Store handle shared across request handlers
pub type SharedStore = Arc<dyn PatientStore>;
