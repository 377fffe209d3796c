use exam_core::model::{QuestionResult, ScoreReport, Section};
use storage::session_store::SessionStore;

use crate::error::ResultsError;

/// A completed attempt as the summary/results views consume it: the frozen
/// result record plus the section grouping computed at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub results: Vec<QuestionResult>,
    pub sections: Vec<Section>,
}

impl AttemptOutcome {
    #[must_use]
    pub fn score_report(&self) -> ScoreReport {
        ScoreReport::from_results(&self.results)
    }
}

/// Read-only access to the frozen attempt.
pub struct ResultsService {
    store: SessionStore,
}

impl ResultsService {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Load the frozen record; `None` means nothing was submitted in this
    /// session (callers redirect to login). When the grouping snapshot is
    /// missing it is recomputed from the result questions.
    ///
    /// # Errors
    ///
    /// Returns `ResultsError::Storage` on backend or decode failure.
    pub async fn load_outcome(&self) -> Result<Option<AttemptOutcome>, ResultsError> {
        let Some(results) = self.store.load_result().await? else {
            return Ok(None);
        };

        let sections = match self.store.load_sections().await? {
            Some(sections) => sections,
            None => sections_from_results(&results),
        };

        Ok(Some(AttemptOutcome { results, sections }))
    }

    /// Stored username for the header line, if a session context survives.
    ///
    /// # Errors
    ///
    /// Returns `ResultsError::Storage` on backend failure.
    pub async fn display_names(&self) -> Result<(String, String), ResultsError> {
        let context = self.store.load_context().await?;
        Ok(context.map_or_else(
            || ("Candidate".to_string(), "Exam".to_string()),
            |ctx| (ctx.username, ctx.exam_name),
        ))
    }

    /// Exit to login: drop the result snapshots and the session context.
    ///
    /// # Errors
    ///
    /// Returns `ResultsError::Storage` on backend failure.
    pub async fn exit_to_login(&self) -> Result<(), ResultsError> {
        self.store.clear_session().await?;
        Ok(())
    }
}

/// Same contiguous-run fold as the live session's grouping, applied to the
/// frozen record when no grouping snapshot was persisted.
fn sections_from_results(results: &[QuestionResult]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for (index, result) in results.iter().enumerate() {
        match sections.last_mut() {
            Some(run) if run.id == result.section_id => {
                run.end_index = index;
            }
            _ => {
                let part_number = u32::try_from(sections.len()).unwrap_or(u32::MAX - 1) + 1;
                sections.push(Section {
                    id: result.section_id,
                    name: result.section_name.clone(),
                    part_number,
                    start_index: index,
                    end_index: index,
                });
            }
        }
    }

    sections
}
