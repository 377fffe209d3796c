use serde::{Deserialize, Serialize};

use crate::model::{Question, SectionId};

/// A named, contiguous sub-range of an exam's question order.
///
/// Sections are a grouping derived from the question list, not an entity
/// with its own lifecycle. `start_index..=end_index` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    /// 1-based ordinal, in question-list order.
    pub part_number: u32,
    pub start_index: usize,
    pub end_index: usize,
}

impl Section {
    /// Number of questions in this section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Always false. A run only comes into existence when a question opens
    /// it, so every section spans at least one question.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index <= self.end_index
    }
}

/// Fold the ordered question list into contiguous section runs.
///
/// A new run starts whenever the section id differs from the previous
/// question's. Input order determines the grouping; the resulting ranges
/// partition `0..questions.len()` with no gaps or overlaps.
#[must_use]
pub fn group_sections(questions: &[Question]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for (index, question) in questions.iter().enumerate() {
        match sections.last_mut() {
            Some(run) if run.id == question.section_id() => {
                run.end_index = index;
            }
            _ => {
                let part_number = u32::try_from(sections.len()).unwrap_or(u32::MAX - 1) + 1;
                sections.push(Section {
                    id: question.section_id(),
                    name: question.section_name().to_string(),
                    part_number,
                    start_index: index,
                    end_index: index,
                });
            }
        }
    }

    sections
}

/// Index of the unique section whose range contains `index`.
///
/// Returns 0 when `sections` is empty or no range matches (the cursor is
/// always kept in range by the session, so the fallback is never hit in
/// practice).
#[must_use]
pub fn section_containing(sections: &[Section], index: usize) -> usize {
    sections
        .iter()
        .position(|section| section.contains(index))
        .unwrap_or(0)
}
