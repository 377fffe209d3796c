use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, SectionId};

/// Visit/answer/review-flag state of a question within an attempt.
///
/// Transitions are driven exclusively by the navigation and answer
/// operations on [`super::AttemptSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    NotVisited,
    NotAnswered,
    Answered,
    Marked,
    AnsMarked,
}

/// One multiple-choice question of an exam.
///
/// Identity, text, options and the correct option never change after
/// construction; only `selected_option` and `status` mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    number: u32,
    text: String,
    options: [String; 4],
    selected_option: Option<usize>,
    correct_option: usize,
    section_id: SectionId,
    section_name: String,
    status: QuestionStatus,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        number: u32,
        text: impl Into<String>,
        options: [String; 4],
        correct_option: usize,
        section_id: SectionId,
        section_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            number,
            text: text.into(),
            options,
            selected_option: None,
            correct_option: correct_option.min(3),
            section_id,
            section_name: section_name.into(),
            status: QuestionStatus::NotVisited,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn section_id(&self) -> SectionId {
        self.section_id
    }

    #[must_use]
    pub fn section_name(&self) -> &str {
        &self.section_name
    }

    #[must_use]
    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    /// True once the candidate's selection matches the correct option.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.selected_option == Some(self.correct_option)
    }

    pub(crate) fn set_selected_option(&mut self, selected: Option<usize>) {
        self.selected_option = selected.map(|i| i.min(3));
    }

    pub(crate) fn set_status(&mut self, status: QuestionStatus) {
        self.status = status;
    }

    /// Promote a never-seen question to "visited but unanswered".
    ///
    /// No-op for any other status.
    pub(crate) fn mark_visited(&mut self) {
        if self.status == QuestionStatus::NotVisited {
            self.status = QuestionStatus::NotAnswered;
        }
    }
}
