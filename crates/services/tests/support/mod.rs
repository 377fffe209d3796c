// Shared between the login and attempt integration tests; not every test
// crate touches every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use exam_core::model::ExamId;
use services::{ApiError, AttemptInfo, ExamApi, ExamInfo, SubmittedAnswer};
use services::api::QuestionDto;

/// Configurable in-memory stand-in for the remote exam service.
///
/// `None` in a response slot simulates an unreachable server for that call.
#[derive(Default)]
pub struct FakeApi {
    pub exams: Option<Vec<ExamInfo>>,
    pub attempts: Option<Vec<AttemptInfo>>,
    pub questions: Option<Vec<QuestionDto>>,
    pub reject_auth: bool,
    pub submit_fails: bool,
    pub submissions: Arc<Mutex<Vec<(u64, Vec<SubmittedAnswer>)>>>,
}

#[async_trait]
impl ExamApi for FakeApi {
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
