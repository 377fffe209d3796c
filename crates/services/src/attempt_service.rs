use std::sync::Arc;

use rand::Rng;

use exam_core::Clock;
use exam_core::model::{
    AttemptSession, Deadline, Question, QuestionId, SectionId, SessionContext,
};
use storage::session_store::SessionStore;

use crate::api::{ExamApi, QuestionDto, SubmittedAnswer};
use crate::error::AttemptError;

/// Placeholder catalog used when the remote fetch is empty or failing: five
/// fixed sections of thirty questions each, so the interface stays usable
/// offline.
const PLACEHOLDER_SECTIONS: [&str; 5] = [
    "Child Development & Pedagogy",
    "Language I",
    "Language II",
    "Mathematics",
    "Science",
];
const PLACEHOLDER_QUESTIONS_PER_SECTION: u32 = 30;

/// Where the question list came from. Placeholder is a deliberate degraded
/// mode, not silent corruption, so it stays observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSource {
    Remote,
    Placeholder,
}

/// Why a submission fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    TimerExpiry,
    Manual,
}

/// Outcome of the exam view's entry guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptGate {
    /// Credential and exam selection are present; start or resume.
    Ready(SessionContext),
    /// Missing credential or exam selection: a normal "not ready" state,
    /// not an error message.
    RedirectLogin,
    /// A finished result already exists for this session; no double-taking.
    RedirectScore,
}

/// A started (possibly resumed) attempt.
#[derive(Debug)]
pub struct LoadedAttempt {
    pub session: AttemptSession,
    pub source: QuestionSource,
}

/// Owns the live attempt's orchestration: fetch + fallback, progress
/// persistence, the deadline, and submission.
pub struct AttemptService {
    clock: Clock,
    api: Arc<dyn ExamApi>,
    store: SessionStore,
}

impl AttemptService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn ExamApi>, store: SessionStore) -> Self {
        Self { clock, api, store }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Entry guards for the exam view, in precedence order: a missing
    /// credential or exam selection sends the candidate back to login, then
    /// an existing result means the attempt is already over.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Storage` on backend failure.
    pub async fn gate(&self) -> Result<AttemptGate, AttemptError> {
        let Some(context) = self.store.load_context().await? else {
            return Ok(AttemptGate::RedirectLogin);
        };
        if self.store.load_result().await?.is_some() {
            return Ok(AttemptGate::RedirectScore);
        }
        Ok(AttemptGate::Ready(context))
    }

    /// Fetch the question list and build the session, resuming saved
    /// progress if any exists for this exam.
    ///
    /// An empty or failed fetch degrades to the placeholder set rather than
    /// failing the attempt.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Storage` on persistence failure.
    pub async fn start_attempt(
        &self,
        context: &SessionContext,
    ) -> Result<LoadedAttempt, AttemptError> {
        let (questions, source) = match self.api.get_questions(&context.token, context.exam_id).await
        {
            Ok(dtos) if !dtos.is_empty() => (map_questions(dtos), QuestionSource::Remote),
            Ok(_) => {
                tracing::warn!(exam_id = %context.exam_id, "empty question list, using placeholders");
                (placeholder_questions(), QuestionSource::Placeholder)
            }
            Err(err) => {
                tracing::warn!(exam_id = %context.exam_id, error = %err, "question fetch failed, using placeholders");
                (placeholder_questions(), QuestionSource::Placeholder)
            }
        };

        let mut session = AttemptSession::new(context.exam_id, questions);
        if let Some(snapshot) = self.store.load_progress(context.exam_id).await? {
            session.restore(&snapshot);
        }

        Ok(LoadedAttempt { session, source })
    }

    /// Reuse the persisted deadline as-is, or set one now. Never restarted
    /// on a reload; that is the whole point of persisting the end instant.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Storage` on persistence failure.
    pub async fn ensure_deadline(&self) -> Result<Deadline, AttemptError> {
        if let Some(existing) = self.store.load_deadline().await? {
            return Ok(existing);
        }
        let deadline = Deadline::starting_at(self.clock.now());
        self.store.save_deadline(&deadline).await?;
        Ok(deadline)
    }

    /// Full snapshot write after a state-changing action.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Storage` on persistence failure.
    pub async fn persist_progress(&self, session: &AttemptSession) -> Result<(), AttemptError> {
        self.store
            .save_progress(session.exam_id(), &session.snapshot())
            .await?;
        Ok(())
    }

    /// Freeze and submit the attempt.
    ///
    /// Local persistence is unconditional; the remote post is best-effort
    /// (logged, never retried, never blocking). In-progress state and the
    /// deadline are cleared afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::Storage` on persistence failure.
    pub async fn submit(
        &self,
        context: &SessionContext,
        session: &AttemptSession,
        reason: SubmitReason,
    ) -> Result<(), AttemptError> {
        tracing::info!(exam_id = %context.exam_id, ?reason, "submitting attempt");

        let results = session.finish();
        self.store.save_result(&results, session.sections()).await?;

        let answers: Vec<SubmittedAnswer> = session
            .questions()
            .iter()
            .map(|question| SubmittedAnswer {
                question_id: question.id().value(),
                selected_option: question.selected_option(),
            })
            .collect();
        if let Err(err) = self
            .api
            .submit_attempt(&context.token, context.exam_id, &answers)
            .await
        {
            tracing::warn!(exam_id = %context.exam_id, error = %err, "remote submit failed, local result kept");
        }

        self.store.clear_attempt(context.exam_id).await?;
        Ok(())
    }
}

/// Map wire questions into the domain shape: options array from the four
/// option fields, correct option from 1-based to 0-based.
fn map_questions(dtos: Vec<QuestionDto>) -> Vec<Question> {
    dtos.into_iter()
        .enumerate()
        .map(|(index, dto)| {
            let number = dto
                .question_number
                .unwrap_or_else(|| u32::try_from(index).unwrap_or(u32::MAX - 1) + 1);
            let correct = usize::try_from(dto.correct_option.saturating_sub(1)).unwrap_or(0);
            Question::new(
                QuestionId::new(dto.id),
                number,
                dto.text,
                [dto.option_1, dto.option_2, dto.option_3, dto.option_4],
                correct,
                SectionId::new(dto.section_id.unwrap_or(0)),
                dto.section_name.unwrap_or_else(|| "General Section".to_string()),
            )
        })
        .collect()
}

fn placeholder_questions() -> Vec<Question> {
    let mut rng = rand::rng();
    let mut questions = Vec::new();
    let mut number = 1_u32;

    for (section_index, section_name) in PLACEHOLDER_SECTIONS.iter().enumerate() {
        for _ in 0..PLACEHOLDER_QUESTIONS_PER_SECTION {
            questions.push(Question::new(
                QuestionId::new(u64::from(number)),
                number,
                format!("Question {number}: Sample question for {section_name}"),
                [
                    "Option A".to_string(),
                    "Option B".to_string(),
                    "Option C".to_string(),
                    "Option D".to_string(),
                ],
                rng.random_range(0..4),
                SectionId::new(u64::try_from(section_index).unwrap_or(0) + 1),
                *section_name,
            ));
            number += 1;
        }
    }

    questions
}
