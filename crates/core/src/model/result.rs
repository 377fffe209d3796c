use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionId, SectionId};

/// Frozen per-question outcome, written once at submission.
///
/// Correctness is derived here exactly once; the results and summary views
/// consume this record and never re-check selections against keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub id: QuestionId,
    pub number: u32,
    pub text: String,
    pub options: [String; 4],
    pub selected_option: Option<usize>,
    pub correct_option: usize,
    pub section_id: SectionId,
    pub section_name: String,
    pub is_correct: bool,
}

impl QuestionResult {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id(),
            number: question.number(),
            text: question.text().to_string(),
            options: question.options().clone(),
            selected_option: question.selected_option(),
            correct_option: question.correct_option(),
            section_id: question.section_id(),
            section_name: question.section_name().to_string(),
            is_correct: question.is_correct(),
        }
    }

    /// Read-only classification used by the results view.
    #[must_use]
    pub fn verdict(&self) -> AnswerVerdict {
        if self.selected_option.is_none() {
            AnswerVerdict::Unanswered
        } else if self.is_correct {
            AnswerVerdict::Correct
        } else {
            AnswerVerdict::Wrong
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerVerdict {
    Unanswered,
    Correct,
    Wrong,
}

/// Per-section tallies for the score summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    pub name: String,
    pub correct: u32,
    pub wrong: u32,
    pub unanswered: u32,
    pub total: u32,
}

impl SectionScore {
    /// Rounded percent of correct answers within the section; 0 when empty.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

/// Aggregate of a frozen attempt: overall counts plus per-section rows in
/// first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub total: u32,
    pub correct: u32,
    pub wrong: u32,
    pub unanswered: u32,
    pub sections: Vec<SectionScore>,
}

impl ScoreReport {
    #[must_use]
    pub fn from_results(results: &[QuestionResult]) -> Self {
        let mut report = Self {
            total: 0,
            correct: 0,
            wrong: 0,
            unanswered: 0,
            sections: Vec::new(),
        };

        for result in results {
            report.total += 1;
            let section = match report
                .sections
                .iter_mut()
                .find(|section| section.name == result.section_name)
            {
                Some(section) => section,
                None => {
                    report.sections.push(SectionScore {
                        name: result.section_name.clone(),
                        correct: 0,
                        wrong: 0,
                        unanswered: 0,
                        total: 0,
                    });
                    report
                        .sections
                        .last_mut()
                        .expect("section was just pushed")
                }
            };
            section.total += 1;

            match result.verdict() {
                AnswerVerdict::Unanswered => {
                    report.unanswered += 1;
                    section.unanswered += 1;
                }
                AnswerVerdict::Correct => {
                    report.correct += 1;
                    section.correct += 1;
                }
                AnswerVerdict::Wrong => {
                    report.wrong += 1;
                    section.wrong += 1;
                }
            }
        }

        report
    }

    /// Rounded overall percent. An empty attempt reports 0 rather than
    /// dividing by zero.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = f64::from(correct) * 100.0 / f64::from(total);
    // round half away from zero, matching the display the candidate expects
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        scaled.round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(
        id: u64,
        section_name: &str,
        selected: Option<usize>,
        correct_option: usize,
    ) -> QuestionResult {
        QuestionResult {
            id: QuestionId::new(id),
            number: u32::try_from(id).unwrap(),
            text: format!("Question {id}"),
            options: [
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            selected_option: selected,
            correct_option,
            section_id: SectionId::new(1),
            section_name: section_name.to_string(),
            is_correct: selected == Some(correct_option),
        }
    }

    #[test]
    fn verdict_classifies_three_ways() {
        assert_eq!(
            result(1, "A", None, 0).verdict(),
            AnswerVerdict::Unanswered
        );
        assert_eq!(result(2, "A", Some(0), 0).verdict(), AnswerVerdict::Correct);
        assert_eq!(result(3, "A", Some(1), 0).verdict(), AnswerVerdict::Wrong);
    }

    #[test]
    fn report_counts_and_percentage() {
        // 18 correct, 10 wrong, 2 unanswered out of 30 => 60%.
        let mut results = Vec::new();
        for id in 1..=18 {
            results.push(result(id, "Section A", Some(0), 0));
        }
        for id in 19..=28 {
            results.push(result(id, "Section A", Some(1), 0));
        }
        for id in 29..=30 {
            results.push(result(id, "Section A", None, 0));
        }

        let report = ScoreReport::from_results(&results);
        assert_eq!(report.total, 30);
        assert_eq!(report.correct, 18);
        assert_eq!(report.wrong, 10);
        assert_eq!(report.unanswered, 2);
        assert_eq!(report.percentage(), 60);
    }

    #[test]
    fn empty_attempt_reports_zero_percent() {
        let report = ScoreReport::from_results(&[]);
        assert_eq!(report.total, 0);
        assert_eq!(report.percentage(), 0);
    }

    #[test]
    fn sections_tally_independently_in_first_appearance_order() {
        let results = vec![
            result(1, "Section A", Some(0), 0),
            result(2, "Section A", None, 0),
            result(3, "Section B", Some(1), 0),
        ];
        let report = ScoreReport::from_results(&results);

        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.sections[0].name, "Section A");
        assert_eq!(report.sections[0].correct, 1);
        assert_eq!(report.sections[0].unanswered, 1);
        assert_eq!(report.sections[0].percentage(), 50);
        assert_eq!(report.sections[1].name, "Section B");
        assert_eq!(report.sections[1].wrong, 1);
        assert_eq!(report.sections[1].percentage(), 0);
    }
}
