use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use exam_core::model::{Deadline, ExamId, QuestionResult, Section, SessionContext, SessionSnapshot};

use crate::repository::{KvStore, StorageError};

const KEY_SESSION: &str = "session";
const KEY_DEADLINE: &str = "attempt_deadline";
const KEY_RESULT: &str = "attempt_result";
const KEY_SECTIONS: &str = "attempt_sections";

/// Typed layer over the raw [`KvStore`]: every domain record gets a fixed
/// key and a JSON encoding. This is the serialization boundary; callers
/// hold the domain objects and only touch the store at load/save points.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KvStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    fn progress_key(exam_id: ExamId) -> String {
        format!("exam_{exam_id}_answers")
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.kv.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.put(key, &raw).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend or decode failure.
    pub async fn load_context(&self) -> Result<Option<SessionContext>, StorageError> {
        self.load(KEY_SESSION).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend or encode failure.
    pub async fn save_context(&self, context: &SessionContext) -> Result<(), StorageError> {
        self.save(KEY_SESSION, context).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn clear_context(&self) -> Result<(), StorageError> {
        self.kv.remove(KEY_SESSION).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend or decode failure.
    pub async fn load_progress(
        &self,
        exam_id: ExamId,
    ) -> Result<Option<SessionSnapshot>, StorageError> {
        self.load(&Self::progress_key(exam_id)).await
    }

    /// Written after every state-changing action; O(question count), which
    /// is fine at the hundred-question scale this client targets.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or encode failure.
    pub async fn save_progress(
        &self,
        exam_id: ExamId,
        snapshot: &SessionSnapshot,
    ) -> Result<(), StorageError> {
        self.save(&Self::progress_key(exam_id), snapshot).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend or decode failure.
    pub async fn load_deadline(&self) -> Result<Option<Deadline>, StorageError> {
        self.load(KEY_DEADLINE).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend or encode failure.
    pub async fn save_deadline(&self, deadline: &Deadline) -> Result<(), StorageError> {
        self.save(KEY_DEADLINE, deadline).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend or decode failure.
    pub async fn load_result(&self) -> Result<Option<Vec<QuestionResult>>, StorageError> {
        self.load(KEY_RESULT).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend or decode failure.
    pub async fn load_sections(&self) -> Result<Option<Vec<Section>>, StorageError> {
        self.load(KEY_SECTIONS).await
    }

    /// Persist the frozen attempt and its section grouping in one go.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or encode failure.
    pub async fn save_result(
        &self,
        results: &[QuestionResult],
        sections: &[Section],
    ) -> Result<(), StorageError> {
        self.save(KEY_RESULT, &results).await?;
        self.save(KEY_SECTIONS, &sections).await
    }

    /// Drop in-progress state after a submit: snapshot and deadline. The
    /// frozen result stays for the summary/results views.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn clear_attempt(&self, exam_id: ExamId) -> Result<(), StorageError> {
        self.kv.remove(&Self::progress_key(exam_id)).await?;
        self.kv.remove(KEY_DEADLINE).await
    }

    /// Drop stale attempt hand-off keys when the login view comes up, while
    /// keeping nothing of a half-finished run around.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn clear_stale_selection(&self) -> Result<(), StorageError> {
        self.kv.remove(KEY_SESSION).await?;
        self.kv.remove(KEY_DEADLINE).await?;
        self.kv.remove(KEY_RESULT).await?;
        self.kv.remove(KEY_SECTIONS).await
    }

    /// Full teardown at exit-to-login: result snapshots and session context.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn clear_session(&self) -> Result<(), StorageError> {
        self.kv.remove(KEY_RESULT).await?;
        self.kv.remove(KEY_SECTIONS).await?;
        self.kv.remove(KEY_SESSION).await
    }
}
