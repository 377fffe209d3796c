use exam_core::model::{AttemptSession, Deadline, ExamId, Question, QuestionId, SectionId};
use exam_core::time::fixed_now;
use storage::repository::KvStore;
use storage::session_store::SessionStore;
use storage::sqlite::SqliteStore;

fn build_question(id: u64) -> Question {
    Question::new(
        QuestionId::new(id),
        u32::try_from(id).unwrap(),
        format!("Question {id}"),
        [
            "Option A".to_string(),
            "Option B".to_string(),
            "Option C".to_string(),
            "Option D".to_string(),
        ],
        1,
        SectionId::new(1),
        "Section A",
    )
}

#[tokio::test]
async fn sqlite_kv_roundtrip_and_overwrite() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    assert!(store.get("missing").await.unwrap().is_none());

    store.put("k", "v1").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

    store.put("k", "v2").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

    store.remove("k").await.unwrap();
    assert!(store.get("k").await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_session_store_persists_attempt_state() {
    let store =
        SessionStore::sqlite("sqlite:file:memdb_session_store?mode=memory&cache=shared")
            .await
            .expect("connect");

    let exam_id = ExamId::new(7);
    let mut session = AttemptSession::new(exam_id, vec![build_question(1), build_question(2)]);
    session.select_option(1);
    session.save_and_next();

    let snapshot = session.snapshot();
    store.save_progress(exam_id, &snapshot).await.unwrap();

    let deadline = Deadline::starting_at(fixed_now());
    store.save_deadline(&deadline).await.unwrap();

    // Simulated reload: everything comes back exactly as written.
    assert_eq!(
        store.load_progress(exam_id).await.unwrap(),
        Some(snapshot)
    );
    assert_eq!(store.load_deadline().await.unwrap(), Some(deadline));

    // Submit path: attempt state goes away, result snapshot stays.
    let results = session.finish();
    let sections = session.sections().to_vec();
    store.save_result(&results, &sections).await.unwrap();
    store.clear_attempt(exam_id).await.unwrap();

    assert!(store.load_progress(exam_id).await.unwrap().is_none());
    assert!(store.load_deadline().await.unwrap().is_none());
    assert_eq!(store.load_result().await.unwrap(), Some(results));
    assert_eq!(store.load_sections().await.unwrap(), Some(sections));
}
