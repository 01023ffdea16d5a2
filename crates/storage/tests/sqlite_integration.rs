use chrono::Duration;
use quiz_core::model::{QuestionId, Response};
use quiz_core::time::fixed_now;
use storage::repository::{ProgressRecord, ProgressStore, Storage};
use storage::sqlite::SqliteRepository;

fn response(id: u32, option: &str, secs: f64) -> Response {
    Response::new(
        QuestionId::new(id),
        format!("Question {id}?"),
        option,
        secs,
        fixed_now() + Duration::seconds(i64::from(id)),
    )
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_response_order() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(!repo.exists().await.unwrap());
    assert!(repo.load().await.unwrap().is_none());

    let record = ProgressRecord::new(
        4,
        vec![response(3, "Often", 2.5), response(1, "Never", 0.75)],
        fixed_now(),
    );
    repo.save(&record).await.unwrap();

    let loaded = repo.load().await.unwrap().expect("record");
    assert_eq!(loaded.current_index, 4);
    assert_eq!(loaded.saved_at, fixed_now());
    assert_eq!(loaded.responses.len(), 2);
    assert_eq!(loaded.responses[0].question_id, QuestionId::new(3));
    assert_eq!(loaded.responses[0].selected_option, "Often");
    assert_eq!(loaded.responses[0].time_spent_secs, 2.5);
    assert_eq!(loaded.responses[1].question_id, QuestionId::new(1));
    assert_eq!(loaded.responses[1].answered_at, fixed_now() + Duration::seconds(1));
}

#[tokio::test]
async fn sqlite_save_overwrites_previous_record() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.save(&ProgressRecord::new(
        3,
        vec![response(1, "A", 1.0), response(2, "B", 1.0)],
        fixed_now(),
    ))
    .await
    .unwrap();
    repo.save(&ProgressRecord::new(2, vec![response(1, "C", 1.0)], fixed_now()))
        .await
        .unwrap();

    let loaded = repo.load().await.unwrap().expect("record");
    assert_eq!(loaded.current_index, 2);
    assert_eq!(loaded.responses.len(), 1);
    assert_eq!(loaded.responses[0].selected_option, "C");
}

#[tokio::test]
async fn sqlite_clear_removes_progress() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_clear?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.save(&ProgressRecord::new(2, vec![response(1, "A", 1.0)], fixed_now()))
        .await
        .unwrap();
    assert!(repo.exists().await.unwrap());

    repo.clear().await.unwrap();
    assert!(!repo.exists().await.unwrap());
    assert!(repo.load().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn storage_sqlite_exposes_progress_store() {
    let storage = Storage::sqlite("sqlite:file:memdb_progress_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .progress
        .save(&ProgressRecord::new(1, Vec::new(), fixed_now()))
        .await
        .unwrap();
    assert!(storage.progress.exists().await.unwrap());
}
