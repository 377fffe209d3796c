use std::sync::Arc;

use exam_core::model::{ExamId, SessionContext};
use storage::session_store::SessionStore;

use crate::api::ExamApi;
use crate::error::LoginError;

/// One row of the exam picker: catalog entry cross-referenced with the
/// candidate's completed attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamListing {
    pub id: ExamId,
    pub name: String,
    pub duration_minutes: u32,
    pub attempted: bool,
    pub score: Option<u32>,
    pub total: Option<u32>,
}

/// Authentication and exam selection.
pub struct LoginService {
    api: Arc<dyn ExamApi>,
    store: SessionStore,
}

impl LoginService {
    #[must_use]
    pub fn new(api: Arc<dyn ExamApi>, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Drop any stale attempt hand-off state when the login view comes up.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::Storage` on backend failure.
    pub async fn reset_stale_state(&self) -> Result<(), LoginError> {
        self.store.clear_stale_selection().await?;
        Ok(())
    }

    /// Exchange credentials for a token. Blank input is rejected locally
    /// before any request goes out.
    ///
    /// # Errors
    ///
    /// `LoginError::MissingInput` for blank fields, `LoginError::AuthRejected`
    /// for a 401, `LoginError::Unreachable` when the server is down.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, LoginError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(LoginError::MissingInput);
        }
        Ok(self.api.authenticate(username, password).await?)
    }

    /// Fetch the catalog and mark exams the candidate already completed.
    ///
    /// A failing attempts listing is tolerated: the catalog still shows,
    /// with nothing marked attempted. An empty catalog is its own error.
    ///
    /// # Errors
    ///
    /// `LoginError::EmptyCatalog` when the server has no exams; otherwise
    /// the mapped `ApiError`.
    pub async fn load_catalog(&self, token: &str) -> Result<Vec<ExamListing>, LoginError> {
        let exams = self.api.list_exams(token).await?;
        if exams.is_empty() {
            return Err(LoginError::EmptyCatalog);
        }

        let attempts = self.api.list_attempts(token).await.unwrap_or_default();

        Ok(exams
            .into_iter()
            .map(|exam| {
                let attempt = attempts.iter().find(|a| a.exam_id == exam.id);
                ExamListing {
                    id: ExamId::new(exam.id),
                    name: exam.name,
                    duration_minutes: exam.duration_minutes,
                    attempted: attempt.is_some(),
                    score: attempt.map(|a| a.score),
                    total: attempt.map(|a| a.total),
                }
            })
            .collect())
    }

    /// Record the chosen exam for the session controller and hand off.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::Storage` on backend failure.
    pub async fn begin_session(
        &self,
        token: &str,
        username: &str,
        exam_id: ExamId,
        exam_name: &str,
    ) -> Result<SessionContext, LoginError> {
        let context = SessionContext::new(token, username, exam_id, exam_name);
        self.store.save_context(&context).await?;
        Ok(context)
    }
}
