use exam_core::model::{AttemptSession, QuestionStatus};

/// Everything the exam view can do to the live attempt. Each intent maps
/// onto one session operation; the view dispatches and persists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptIntent {
    Select(usize),
    SaveAndNext,
    MarkForReview,
    ClearResponse,
    JumpToQuestion(usize),
    JumpToSection(usize),
}

/// Palette/legend tallies per question status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub not_visited: u32,
    pub not_answered: u32,
    pub answered: u32,
    pub marked: u32,
    pub ans_marked: u32,
}

/// View-model wrapper around the live session. State only changes through
/// [`AttemptVm::apply`]; the view persists a snapshot after every change.
pub struct AttemptVm {
    session: AttemptSession,
}

impl AttemptVm {
    #[must_use]
    pub fn new(session: AttemptSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &AttemptSession {
        &self.session
    }

    /// Apply an intent. Returns whether anything could have changed, so the
    /// view can skip persisting rejected jumps.
    pub fn apply(&mut self, intent: AttemptIntent) -> bool {
        match intent {
            AttemptIntent::Select(option_index) => {
                self.session.select_option(option_index);
                true
            }
            AttemptIntent::SaveAndNext => {
                self.session.save_and_next();
                true
            }
            AttemptIntent::MarkForReview => {
                self.session.mark_for_review();
                true
            }
            AttemptIntent::ClearResponse => {
                self.session.clear_response();
                true
            }
            AttemptIntent::JumpToQuestion(index) => {
                if index >= self.session.total_questions() {
                    return false;
                }
                self.session.jump_to_question(index);
                true
            }
            AttemptIntent::JumpToSection(section_index) => {
                if section_index >= self.session.sections().len() {
                    return false;
                }
                self.session.jump_to_section(section_index);
                true
            }
        }
    }

    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for question in self.session.questions() {
            match question.status() {
                QuestionStatus::NotVisited => counts.not_visited += 1,
                QuestionStatus::NotAnswered => counts.not_answered += 1,
                QuestionStatus::Answered => counts.answered += 1,
                QuestionStatus::Marked => counts.marked += 1,
                QuestionStatus::AnsMarked => counts.ans_marked += 1,
            }
        }
        counts
    }
}

#[must_use]
pub fn status_class(status: QuestionStatus) -> &'static str {
    match status {
        QuestionStatus::NotVisited => "palette-btn palette-btn--not-visited",
        QuestionStatus::NotAnswered => "palette-btn palette-btn--not-answered",
        QuestionStatus::Answered => "palette-btn palette-btn--answered",
        QuestionStatus::Marked => "palette-btn palette-btn--marked",
        QuestionStatus::AnsMarked => "palette-btn palette-btn--ans-marked",
    }
}

#[must_use]
pub fn status_label(status: QuestionStatus) -> &'static str {
    match status {
        QuestionStatus::NotVisited => "Not Visited",
        QuestionStatus::NotAnswered => "Not Answered",
        QuestionStatus::Answered => "Answered",
        QuestionStatus::Marked => "Marked for Review",
        QuestionStatus::AnsMarked => "Answered & Marked",
    }
}
