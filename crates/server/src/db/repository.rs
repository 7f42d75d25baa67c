use async_trait::async_trait;
use deadpool_postgres::{Object, Pool};
use patient_core::{Patient, PatientStore, StoreError, StoreResult};
use serde_json::Value as JsonValue;
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS patients (
    id   TEXT PRIMARY KEY,
    seq  BIGSERIAL NOT NULL,
    data JSONB NOT NULL
);
CREATE INDEX IF NOT EXISTS patients_seq_idx ON patients (seq);
";

/// Patient store backed by a Postgres table.
///
/// `save` upserts on `id`; a replaced row keeps its original `seq`, so `list`
/// stays in first-insertion order.
#[derive(Clone)]
pub struct PgPatientStore {
    pool: Pool,
}

impl PgPatientStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create the `patients` table if it does not exist yet
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        let client = self.client().await?;
        client
            .batch_execute(SCHEMA)
            .await
            .map_err(StoreError::backend)
    }

    async fn client(&self) -> StoreResult<Object> {
        self.pool.get().await.map_err(StoreError::backend)
    }
}

/// Rebuild a patient from its row. Stored data never carries `id`.
fn from_row(id: String, data: JsonValue) -> StoreResult<Patient> {
    match data {
        JsonValue::Object(fields) => Ok(Patient::from_fields(fields).with_id(id)),
        other => Err(StoreError::Backend(format!(
            "Patient/{} has non-object data: {}",
            id, other
        ))),
    }
}

#[async_trait]
impl PatientStore for PgPatientStore {
    async fn list(&self) -> StoreResult<Vec<Patient>> {
        let client = self.client().await?;
        let rows = client
            .query("SELECT id, data FROM patients ORDER BY seq", &[])
            .await
            .map_err(StoreError::backend)?;

        rows.into_iter()
            .map(|row| from_row(row.get(0), row.get(1)))
            .collect()
    }

    async fn get(&self, id: &str) -> StoreResult<Patient> {
        let client = self.client().await?;
        let row = client
            .query_opt("SELECT data FROM patients WHERE id = $1", &[&id])
            .await
            .map_err(StoreError::backend)?;

        match row {
            Some(row) => from_row(id.to_string(), row.get(0)),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn save(&self, patient: Patient) -> StoreResult<Patient> {
        let id = patient
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let data = patient.into_fields();

        let client = self.client().await?;
        let row = client
            .query_one(
                "INSERT INTO patients (id, data) VALUES ($1, $2::jsonb) \
                 ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data \
                 RETURNING data",
                &[&id, &data],
            )
            .await
            .map_err(StoreError::backend)?;

        tracing::debug!(patient_id = %id, "Patient row written");
        from_row(id, row.get(0))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let client = self.client().await?;
        let removed = client
            .execute("DELETE FROM patients WHERE id = $1", &[&id])
            .await
            .map_err(StoreError::backend)?;

        if removed == 0 {
            Err(StoreError::NotFound(id.to_string()))
        } else {
            Ok(())
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        let client = self.client().await?;
        client
            .query_one("SELECT 1", &[])
            .await
            .map(|_| ())
            .map_err(StoreError::backend)
    }
}
