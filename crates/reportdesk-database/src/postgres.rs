//! PostgreSQL record store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use reportdesk_core::error::{AppError, ErrorKind};
use reportdesk_core::result::AppResult;
use reportdesk_core::types::RecordId;
use reportdesk_entity::record::{CreateRecord, Record, ReplaceRecord};

use crate::store::RecordStore;

const RECORD_COLUMNS: &str = "id, name_surname, document_date, start_date, end_date, duration, \
     amount, place, id_card_number, avatar_url, submitted_at AS \"timestamp\"";

/// Record store over the `reports` table.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Create a new store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    fn backend_type(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
    }

    async fn create(&self, record: &CreateRecord) -> AppResult<Record> {
        let fields = &record.fields;
        let sql = format!(
            "INSERT INTO reports (name_surname, document_date, start_date, end_date, duration, \
             amount, place, id_card_number, avatar_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {RECORD_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Record>(&sql)
            .bind(&fields.name_surname)
            .bind(&fields.document_date)
            .bind(&fields.start_date)
            .bind(&fields.end_date)
            .bind(&fields.duration)
            .bind(fields.amount)
            .bind(&fields.place)
            .bind(&fields.id_card_number)
            .bind(&record.avatar_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert record", e))?;

        debug!(record_id = %created.id, "Record inserted");
        Ok(created)
    }

    async fn list_all(&self) -> AppResult<Vec<Record>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM reports");
        sqlx::query_as::<_, Record>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list records", e))
    }

    async fn replace(&self, id: &RecordId, record: &ReplaceRecord) -> AppResult<()> {
        let fields = &record.fields;
        let result = sqlx::query(
            "UPDATE reports SET name_surname = $2, document_date = $3, start_date = $4, \
             end_date = $5, duration = $6, amount = $7, place = $8, id_card_number = $9, \
             avatar_url = $10, submitted_at = $11 WHERE id = $1",
        )
        .bind(id.as_str())
        .bind(&fields.name_surname)
        .bind(&fields.document_date)
        .bind(&fields.start_date)
        .bind(&fields.end_date)
        .bind(&fields.duration)
        .bind(fields.amount)
        .bind(&fields.place)
        .bind(&fields.id_card_number)
        .bind(&record.avatar_url)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update record", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Record '{id}' not found")));
        }
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete record", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Record '{id}' not found")));
        }
        Ok(())
    }
}
