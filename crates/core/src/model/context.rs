use serde::{Deserialize, Serialize};

use crate::model::ExamId;

/// Explicit cross-view session state: who is signed in and which exam they
/// picked. Views receive this object; the local store is only its
/// serialization boundary (load at view start, save on hand-off).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: String,
    pub username: String,
    pub exam_id: ExamId,
    pub exam_name: String,
}

impl SessionContext {
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        username: impl Into<String>,
        exam_id: ExamId,
        exam_name: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            exam_id,
            exam_name: exam_name.into(),
        }
    }
}
