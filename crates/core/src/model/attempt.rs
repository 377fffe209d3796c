use serde::{Deserialize, Serialize};

use crate::model::{
    ExamId, Question, QuestionId, QuestionResult, QuestionStatus, Section, group_sections,
    section_containing,
};

/// Persisted selection/status for one question, matched back by id on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAnswer {
    pub question_id: QuestionId,
    pub selected_option: Option<usize>,
    pub status: QuestionStatus,
}

/// Full persisted shape of an in-progress attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub answers: Vec<SavedAnswer>,
    pub current_index: usize,
}

/// The live attempt: question list, derived sections, and the navigation
/// cursor. All state transitions flow through the operations below; callers
/// persist a [`SessionSnapshot`] after each mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSession {
    exam_id: ExamId,
    questions: Vec<Question>,
    sections: Vec<Section>,
    current: usize,
}

impl AttemptSession {
    /// Build a session over an ordered, non-empty question list.
    ///
    /// The first question is promoted to `not_answered` (it is on screen
    /// immediately) and the section grouping is derived from list order.
    #[must_use]
    pub fn new(exam_id: ExamId, mut questions: Vec<Question>) -> Self {
        if let Some(first) = questions.first_mut() {
            first.mark_visited();
        }
        let sections = group_sections(&questions);
        Self {
            exam_id,
            questions,
            sections,
            current: 0,
        }
    }

    #[must_use]
    pub fn exam_id(&self) -> ExamId {
        self.exam_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Index of the section whose range contains the cursor.
    #[must_use]
    pub fn current_section_index(&self) -> usize {
        section_containing(&self.sections, self.current)
    }

    #[must_use]
    pub fn current_section_name(&self) -> &str {
        self.sections
            .get(self.current_section_index())
            .map_or("General Section", |section| section.name.as_str())
    }

    /// Record a selection on the current question. Status is untouched; it
    /// only changes on save/mark/clear.
    pub fn select_option(&mut self, option_index: usize) {
        if let Some(question) = self.questions.get_mut(self.current) {
            question.set_selected_option(Some(option_index));
        }
    }

    /// Commit the current question as answered (or not, when nothing is
    /// selected) and advance. At the last question the cursor stays put but
    /// the status update still applies.
    pub fn save_and_next(&mut self) {
        if let Some(question) = self.questions.get_mut(self.current) {
            let status = if question.selected_option().is_some() {
                QuestionStatus::Answered
            } else {
                QuestionStatus::NotAnswered
            };
            question.set_status(status);
        }
        self.advance();
    }

    /// Flag the current question for review and advance. Keeps track of
    /// whether an answer was present (`ans_marked` vs `marked`).
    pub fn mark_for_review(&mut self) {
        if let Some(question) = self.questions.get_mut(self.current) {
            let status = if question.selected_option().is_some() {
                QuestionStatus::AnsMarked
            } else {
                QuestionStatus::Marked
            };
            question.set_status(status);
        }
        self.advance();
    }

    /// Drop the current selection and reset status to `not_answered`.
    pub fn clear_response(&mut self) {
        if let Some(question) = self.questions.get_mut(self.current) {
            question.set_selected_option(None);
            question.set_status(QuestionStatus::NotAnswered);
        }
    }

    /// Move the cursor to any valid index, backward jumps included.
    ///
    /// Out-of-range indices are ignored. The newly current question is
    /// promoted from `not_visited` to `not_answered`.
    pub fn jump_to_question(&mut self, index: usize) {
        if index >= self.questions.len() {
            return;
        }
        self.current = index;
        self.questions[index].mark_visited();
    }

    /// Jump to the first question of the given section.
    pub fn jump_to_section(&mut self, section_index: usize) {
        if let Some(section) = self.sections.get(section_index) {
            let start = section.start_index;
            self.jump_to_question(start);
        }
    }

    fn advance(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.questions[self.current].mark_visited();
        }
    }

    /// Capture the persistable state: every question's selection/status plus
    /// the cursor.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            answers: self
                .questions
                .iter()
                .map(|question| SavedAnswer {
                    question_id: question.id(),
                    selected_option: question.selected_option(),
                    status: question.status(),
                })
                .collect(),
            current_index: self.current,
        }
    }

    /// Reapply a saved snapshot over freshly loaded questions.
    ///
    /// Answers are matched by question id; ids that no longer exist are
    /// ignored. The cursor is clamped into range.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) {
        for saved in &snapshot.answers {
            if let Some(question) = self
                .questions
                .iter_mut()
                .find(|question| question.id() == saved.question_id)
            {
                question.set_selected_option(saved.selected_option);
                question.set_status(saved.status);
            }
        }
        self.current = snapshot
            .current_index
            .min(self.questions.len().saturating_sub(1));
    }

    /// Freeze the attempt into its immutable result record.
    #[must_use]
    pub fn finish(&self) -> Vec<QuestionResult> {
        self.questions.iter().map(QuestionResult::from_question).collect()
    }
}
