use chrono::Duration;
use dioxus::prelude::ReadableExt;

use exam_core::model::{
    AttemptSession, Deadline, ExamId, Question, QuestionId, SectionId, SessionContext,
    group_sections,
};
use exam_core::time::fixed_now;
use services::SubmitReason;

use super::test_harness::{
    FakeExamApi, ViewKind, fake_api, setup_view_harness, setup_view_harness_with_api,
};
use crate::vm::AttemptIntent;

fn context() -> SessionContext {
    SessionContext::new("tok", "alice", ExamId::new(1), "Mock Exam")
}

fn question(id: u64, section_id: u64, section_name: &str) -> Question {
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
        0,
        SectionId::new(section_id),
        section_name,
    )
}

/// Seeds the store with a frozen two-section attempt, the shape the score
/// and results views load.
async fn seed_finished_attempt(store: &storage::session_store::SessionStore) {
    let questions = vec![
        question(1, 1, "Section A"),
        question(2, 1, "Section A"),
        question(3, 2, "Section B"),
    ];
    let session = AttemptSession::new(ExamId::new(1), questions.clone());
    let results = session.finish();
    let sections = group_sections(&questions);

    store.save_context(&context()).await.expect("save context");
    store
        .save_result(&results, &sections)
        .await
        .expect("save result");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_credentials_form() {
    let mut harness = setup_view_harness(ViewKind::Login).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("ExamDesk"), "missing title in {html}");
    assert!(html.contains("Username"), "missing username field in {html}");
    assert!(html.contains("Sign In"), "missing submit button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_header_timer_and_sections() {
    let mut harness = setup_view_harness(ViewKind::Exam).await;
    harness
        .store
        .save_context(&context())
        .await
        .expect("save context");

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Mock Exam"), "missing exam name in {html}");
    assert!(html.contains("Candidate: alice"), "missing candidate in {html}");
    assert!(html.contains("Time Left: 150:00"), "missing countdown in {html}");
    assert!(html.contains("Question 1 of 3"), "missing question header in {html}");
    assert!(html.contains("Part 1: Section A"), "missing first tab in {html}");
    assert!(html.contains("Part 2: Section B"), "missing second tab in {html}");
    assert!(html.contains("Mark for Review"), "missing actions in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_redirects_to_score_when_result_exists() {
    let mut harness = setup_view_harness(ViewKind::Exam).await;
    seed_finished_attempt(&harness.store).await;

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("score-landing"), "missing redirect in {html}");
    assert!(!html.contains("Candidate:"), "attempt must not render in {html}");
    assert!(harness.submissions.lock().unwrap().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_without_session_renders_no_attempt() {
    let mut harness = setup_view_harness(ViewKind::Exam).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(!html.contains("Candidate:"), "attempt must not render in {html}");
    assert!(!html.contains("score-landing"), "must not reach score in {html}");
    assert!(harness.submissions.lock().unwrap().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn expired_deadline_auto_submits_exactly_once_on_entry() {
    let mut harness = setup_view_harness(ViewKind::Exam).await;
    harness
        .store
        .save_context(&context())
        .await
        .expect("save context");
    let expired = Deadline::new(fixed_now() - Duration::minutes(1));
    harness
        .store
        .save_deadline(&expired)
        .await
        .expect("save deadline");

    harness.rebuild();
    harness.settle().await;

    assert_eq!(harness.submissions.lock().unwrap().len(), 1);
    assert!(harness.store.load_result().await.expect("load result").is_some());
    assert!(harness
        .store
        .load_deadline()
        .await
        .expect("load deadline")
        .is_none());
    let html = harness.render();
    assert!(html.contains("score-landing"), "missing redirect in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn manual_submit_fires_exactly_once_for_rapid_clicks() {
    let mut harness = setup_view_harness(ViewKind::Exam).await;
    harness
        .store
        .save_context(&context())
        .await
        .expect("save context");

    harness.rebuild();
    harness.settle().await;

    let handles = harness.exam_handles.clone().expect("exam handles");
    let submit = handles.submit();
    submit.call(SubmitReason::Manual);
    submit.call(SubmitReason::Manual);
    harness.settle().await;

    assert_eq!(harness.submissions.lock().unwrap().len(), 1);
    let html = harness.render();
    assert!(html.contains("score-landing"), "missing redirect in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dispatched_answers_advance_and_persist() {
    let mut harness = setup_view_harness(ViewKind::Exam).await;
    harness
        .store
        .save_context(&context())
        .await
        .expect("save context");

    harness.rebuild();
    harness.settle().await;

    let handles = harness.exam_handles.clone().expect("exam handles");
    let dispatch = handles.dispatch();
    dispatch.call(AttemptIntent::Select(1));
    harness.settle().await;
    dispatch.call(AttemptIntent::SaveAndNext);
    harness.settle().await;

    let snapshot = harness
        .store
        .load_progress(ExamId::new(1))
        .await
        .expect("load progress")
        .expect("snapshot saved");
    assert_eq!(snapshot.current_index, 1);
    assert_eq!(snapshot.answers[0].selected_option, Some(1));

    let vm = handles.vm();
    assert_eq!(
        vm.read().as_ref().expect("attempt loaded").session().current_index(),
        1
    );
    let html = harness.render();
    assert!(html.contains("Question 2 of 3"), "cursor must advance in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_question_fetch_shows_placeholder_banner() {
    let api = FakeExamApi {
        questions: None,
        ..fake_api()
    };
    let mut harness = setup_view_harness_with_api(ViewKind::Exam, api).await;
    harness
        .store
        .save_context(&context())
        .await
        .expect("save context");

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Showing practice questions instead"),
        "missing degraded-mode banner in {html}"
    );
    assert!(html.contains("Question 1 of 150"), "missing placeholder set in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn score_view_smoke_renders_totals_and_section_table() {
    let mut harness = setup_view_harness(ViewKind::Score).await;
    seed_finished_attempt(&harness.store).await;

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Results for alice"), "missing header in {html}");
    assert!(html.contains("Total: 3"), "missing total in {html}");
    assert!(html.contains("Section A"), "missing section row in {html}");
    assert!(html.contains("View Answers"), "missing answers link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_review_and_section_tabs() {
    let mut harness = setup_view_harness(ViewKind::Results).await;
    seed_finished_attempt(&harness.store).await;

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Answer Review"), "missing title in {html}");
    assert!(html.contains("Question 1 of 3"), "missing review header in {html}");
    assert!(html.contains("Part 2: Section B"), "missing section tab in {html}");
    assert!(html.contains("Not Answered"), "missing verdict in {html}");
}
