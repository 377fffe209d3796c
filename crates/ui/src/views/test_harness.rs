use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use exam_core::model::ExamId;
use exam_core::time::fixed_now;
use services::api::QuestionDto;
use services::{
    ApiError, AttemptInfo, AttemptService, Clock, ExamApi, ExamInfo, LoginService,
    ResultsService, SubmittedAnswer,
};
use storage::repository::InMemoryStore;
use storage::session_store::SessionStore;

use crate::context::{UiApp, build_app_context};
use crate::views::exam::ExamTestHandles;
use crate::views::{ExamView, LoginView, ResultsView, ScoreView};

/// Configurable in-memory stand-in for the remote exam service. `None` in a
/// response slot simulates an unreachable server for that call.
#[derive(Default)]
pub struct FakeExamApi {
    pub exams: Option<Vec<ExamInfo>>,
    pub attempts: Option<Vec<AttemptInfo>>,
    pub questions: Option<Vec<QuestionDto>>,
    pub reject_auth: bool,
    pub submit_fails: bool,
    pub submissions: Arc<Mutex<Vec<(u64, Vec<SubmittedAnswer>)>>>,
}

#[async_trait]
impl ExamApi for FakeExamApi {
    async fn authenticate(&self, _username: &str, _password: &str) -> Result<String, ApiError> {
        if self.reject_auth {
            return Err(ApiError::InvalidCredentials);
        }
        Ok("fake-token".to_string())
    }

    async fn list_exams(&self, _token: &str) -> Result<Vec<ExamInfo>, ApiError> {
        self.exams.clone().ok_or(ApiError::Unreachable)
    }

    async fn list_attempts(&self, _token: &str) -> Result<Vec<AttemptInfo>, ApiError> {
        self.attempts.clone().ok_or(ApiError::Unreachable)
    }

    async fn get_questions(
        &self,
        _token: &str,
        _exam_id: ExamId,
    ) -> Result<Vec<QuestionDto>, ApiError> {
        self.questions.clone().ok_or(ApiError::Unreachable)
    }

    async fn submit_attempt(
        &self,
        _token: &str,
        exam_id: ExamId,
        answers: &[SubmittedAnswer],
    ) -> Result<(), ApiError> {
        if self.submit_fails {
            return Err(ApiError::Unreachable);
        }
        self.submissions
            .lock()
            .unwrap()
            .push((exam_id.value(), answers.to_vec()));
        Ok(())
    }
}

pub fn question_dto(id: u64, section_id: u64, section_name: &str, correct: u32) -> QuestionDto {
    QuestionDto {
        id,
        question_number: Some(u32::try_from(id).unwrap()),
        text: format!("Question {id}"),
        option_1: "Option A".into(),
        option_2: "Option B".into(),
        option_3: "Option C".into(),
        option_4: "Option D".into(),
        correct_option: correct,
        section_id: Some(section_id),
        section_name: Some(section_name.to_string()),
    }
}

/// Default api: two sections, three questions, everything reachable.
pub fn fake_api() -> FakeExamApi {
    FakeExamApi {
        exams: Some(vec![ExamInfo {
            id: 1,
            name: "Mock Exam".to_string(),
            duration_minutes: 150,
        }]),
        attempts: Some(Vec::new()),
        questions: Some(vec![
            question_dto(1, 1, "Section A", 2),
            question_dto(2, 1, "Section A", 1),
            question_dto(3, 2, "Section B", 4),
        ]),
        ..FakeExamApi::default()
    }
}

struct TestApp {
    login_service: Arc<LoginService>,
    attempt_service: Arc<AttemptService>,
    results_service: Arc<ResultsService>,
}

impl UiApp for TestApp {
    fn login_service(&self) -> Arc<LoginService> {
        Arc::clone(&self.login_service)
    }

    fn attempt_service(&self) -> Arc<AttemptService> {
        Arc::clone(&self.attempt_service)
    }

    fn results_service(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results_service)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Exam,
    Score,
    Results,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    exam_handles: Option<ExamTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.exam_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

// Mirrors the app's route paths so navigation out of the view under test
// lands on an observable marker page.
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/exam")]
    ExamLanding {},
    #[route("/score")]
    ScoreLanding {},
    #[route("/results")]
    ResultsLanding {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Exam => rsx! { ExamView {} },
        ViewKind::Score => rsx! { ScoreView {} },
        ViewKind::Results => rsx! { ResultsView {} },
    }
}

#[component]
fn ExamLanding() -> Element {
    rsx! {
        p { "exam-landing" }
    }
}

#[component]
fn ScoreLanding() -> Element {
    rsx! {
        p { "score-landing" }
    }
}

#[component]
fn ResultsLanding() -> Element {
    rsx! {
        p { "results-landing" }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: SessionStore,
    pub submissions: Arc<Mutex<Vec<(u64, Vec<SubmittedAnswer>)>>>,
    pub exam_handles: Option<ExamTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Enough passes to let a boot resource, the effects it triggers, and
    /// one spawned follow-up future all run.
    pub async fn settle(&mut self) {
        for _ in 0..8 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_api(view, fake_api()).await
}

pub async fn setup_view_harness_with_api(view: ViewKind, api: FakeExamApi) -> ViewHarness {
    let store = SessionStore::new(Arc::new(InMemoryStore::new()));
    let submissions = Arc::clone(&api.submissions);
    let api: Arc<dyn ExamApi> = Arc::new(api);
    let clock = Clock::fixed(fixed_now());

    let app = Arc::new(TestApp {
        login_service: Arc::new(LoginService::new(Arc::clone(&api), store.clone())),
        attempt_service: Arc::new(AttemptService::new(clock, Arc::clone(&api), store.clone())),
        results_service: Arc::new(ResultsService::new(store.clone())),
    });

    let exam_handles = match view {
        ViewKind::Exam => Some(ExamTestHandles::default()),
        _ => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            exam_handles: exam_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        store,
        submissions,
        exam_handles,
    }
}
