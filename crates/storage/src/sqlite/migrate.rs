use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs the versioned migrations for the progress schema.
///
/// Version 1 creates the single-row `quiz_progress` table and the ordered
/// `quiz_responses` log that belongs to it.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS quiz_progress (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    current_index INTEGER NOT NULL CHECK (current_index >= 0),
                    saved_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS quiz_responses (
                    position INTEGER PRIMARY KEY CHECK (position >= 0),
                    progress_id INTEGER NOT NULL DEFAULT 1,
                    question_id INTEGER NOT NULL CHECK (question_id >= 0),
                    question_text TEXT NOT NULL,
                    selected_option TEXT NOT NULL,
                    time_spent_secs REAL NOT NULL CHECK (time_spent_secs >= 0),
                    answered_at TEXT NOT NULL,
                    FOREIGN KEY (progress_id) REFERENCES quiz_progress(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
