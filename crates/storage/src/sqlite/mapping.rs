use quiz_core::model::{QuestionId, Response};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn index_to_i64(field: &'static str, v: usize) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn index_from_i64(field: &'static str, v: i64) -> Result<usize, StorageError> {
    usize::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    u32::try_from(v)
        .map(QuestionId::new)
        .map_err(|_| StorageError::Serialization(format!("invalid question_id: {v}")))
}

pub(crate) fn map_response_row(row: &sqlx::sqlite::SqliteRow) -> Result<Response, StorageError> {
    let question_id = question_id_from_i64(row.try_get::<i64, _>("question_id").map_err(ser)?)?;
    let question_text: String = row.try_get("question_text").map_err(ser)?;
    let selected_option: String = row.try_get("selected_option").map_err(ser)?;
    let time_spent_secs: f64 = row.try_get("time_spent_secs").map_err(ser)?;
    let answered_at = row.try_get("answered_at").map_err(ser)?;

    Ok(Response::new(
        question_id,
        question_text,
        selected_option,
        time_spent_secs,
        answered_at,
    ))
}
