use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use exam_core::model::ExamId;

use crate::error::ApiError;

/// One exam the candidate may take.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExamInfo {
    pub id: u64,
    pub name: String,
    pub duration_minutes: u32,
}

/// A completed attempt, as the server records it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttemptInfo {
    pub exam_id: u64,
    pub score: u32,
    pub total: u32,
}

/// Wire shape of one question. `correct_option` is 1-based on the wire;
/// the domain mapping converts it to a 0-based index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionDto {
    pub id: u64,
    pub question_number: Option<u32>,
    pub text: String,
    pub option_1: String,
    pub option_2: String,
    pub option_3: String,
    pub option_4: String,
    pub correct_option: u32,
    pub section_id: Option<u64>,
    pub section_name: Option<String>,
}

/// One answer in the submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedAnswer {
    pub question_id: u64,
    pub selected_option: Option<usize>,
}

/// Contract for the remote exam service. The client flow never retries any
/// of these; every failure is handled once by the caller.
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// Exchange credentials for an opaque bearer token.
    ///
    /// # Errors
    ///
    /// `ApiError::InvalidCredentials` on a 401, `ApiError::Unreachable` when
    /// the server cannot be contacted, other statuses as `ApiError::Status`.
    async fn authenticate(&self, username: &str, password: &str) -> Result<String, ApiError>;

    /// Ordered exam catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failure.
    async fn list_exams(&self, token: &str) -> Result<Vec<ExamInfo>, ApiError>;

    /// Attempts the candidate already completed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failure.
    async fn list_attempts(&self, token: &str) -> Result<Vec<AttemptInfo>, ApiError>;

    /// Ordered question list for one exam; may be empty.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failure.
    async fn get_questions(
        &self,
        token: &str,
        exam_id: ExamId,
    ) -> Result<Vec<QuestionDto>, ApiError>;

    /// Post the candidate's answers. Best-effort: callers log failures and
    /// keep going, local state stays the source of truth.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failure.
    async fn submit_attempt(
        &self,
        token: &str,
        exam_id: ExamId,
        answers: &[SubmittedAnswer],
    ) -> Result<(), ApiError>;
}

#[derive(Clone, Debug)]
pub struct ExamClientConfig {
    pub base_url: String,
}

impl ExamClientConfig {
    /// Reads `EXAMDESK_API_URL`, defaulting to the local dev server.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("EXAMDESK_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".into());
        Self { base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// HTTP implementation of [`ExamApi`].
#[derive(Clone)]
pub struct ExamClient {
    client: Client,
    config: ExamClientConfig,
}

impl ExamClient {
    #[must_use]
    pub fn new(config: ExamClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ExamClientConfig::from_env())
    }

    fn map_transport(err: reqwest::Error) -> ApiError {
        if err.is_connect() || err.is_timeout() {
            ApiError::Unreachable
        } else {
            ApiError::Http(err)
        }
    }
}

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    exam_id: u64,
    answers: &'a [SubmittedAnswer],
}

#[async_trait]
impl ExamApi for ExamClient {
    async fn authenticate(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.config.endpoint("api-token-auth/"))
            .json(&AuthRequest { username, password })
            .send()
            .await
            .map_err(Self::map_transport)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::InvalidCredentials);
        }
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let body: AuthResponse = response.json().await?;
        Ok(body.token)
    }

    async fn list_exams(&self, token: &str) -> Result<Vec<ExamInfo>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint("api/exams/"))
            .header("Authorization", format!("Token {token}"))
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    async fn list_attempts(&self, token: &str) -> Result<Vec<AttemptInfo>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint("api/user-attempts/"))
            .header("Authorization", format!("Token {token}"))
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    async fn get_questions(
        &self,
        token: &str,
        exam_id: ExamId,
    ) -> Result<Vec<QuestionDto>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(&format!("api/exam/{exam_id}/questions/")))
            .header("Authorization", format!("Token {token}"))
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    async fn submit_attempt(
        &self,
        token: &str,
        exam_id: ExamId,
        answers: &[SubmittedAnswer],
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.config.endpoint("api/submit-exam/"))
            .header("Authorization", format!("Token {token}"))
            .json(&SubmitRequest {
                exam_id: exam_id.value(),
                answers,
            })
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ExamClientConfig {
            base_url: "http://127.0.0.1:8000/".into(),
        };
        assert_eq!(
            config.endpoint("api/exams/"),
            "http://127.0.0.1:8000/api/exams/"
        );
    }

    #[test]
    fn question_dto_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 5,
            "question_number": null,
            "text": "Pick one",
            "option_1": "A",
            "option_2": "B",
            "option_3": "C",
            "option_4": "D",
            "correct_option": 2,
            "section_id": null,
            "section_name": null
        }"#;
        let dto: QuestionDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.question_number, None);
        assert_eq!(dto.correct_option, 2);
        assert!(dto.section_name.is_none());
    }
}
