use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{index_from_i64, index_to_i64, map_response_row, ser};
use crate::repository::{ProgressRecord, ProgressStore, StorageError};

#[async_trait::async_trait]
impl ProgressStore for SqliteRepository {
    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let current_index = index_to_i64("current_index", record.current_index)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO quiz_progress (id, current_index, saved_at)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                current_index = excluded.current_index,
                saved_at = excluded.saved_at
            ",
        )
        .bind(current_index)
        .bind(record.saved_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        sqlx::query("DELETE FROM quiz_responses")
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        for (position, response) in record.responses.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO quiz_responses (
                    position, question_id, question_text, selected_option,
                    time_spent_secs, answered_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(index_to_i64("position", position)?)
            .bind(i64::from(response.question_id.value()))
            .bind(response.question_text.as_str())
            .bind(response.selected_option.as_str())
            .bind(response.time_spent_secs)
            .bind(response.answered_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query("SELECT current_index, saved_at FROM quiz_progress WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let current_index =
            index_from_i64("current_index", row.try_get::<i64, _>("current_index").map_err(ser)?)?;
        let saved_at = row.try_get("saved_at").map_err(ser)?;

        let rows = sqlx::query(
            r"
            SELECT question_id, question_text, selected_option, time_spent_secs, answered_at
            FROM quiz_responses
            ORDER BY position ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut responses = Vec::with_capacity(rows.len());
        for row in rows {
            responses.push(map_response_row(&row)?);
        }

        Ok(Some(ProgressRecord::new(current_index, responses, saved_at)))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        sqlx::query("DELETE FROM quiz_responses")
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        sqlx::query("DELETE FROM quiz_progress")
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn exists(&self) -> Result<bool, StorageError> {
        let row = sqlx::query("SELECT 1 FROM quiz_progress WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(row.is_some())
    }
}
