mod attempt;
mod context;
mod ids;
mod question;
mod result;
mod section;
mod timer;

pub use ids::{ExamId, ParseIdError, QuestionId, SectionId};

pub use attempt::{AttemptSession, SavedAnswer, SessionSnapshot};
pub use context::SessionContext;
pub use question::{Question, QuestionStatus};
pub use result::{AnswerVerdict, QuestionResult, ScoreReport, SectionScore};
pub use section::{Section, group_sections, section_containing};
pub use timer::{ATTEMPT_DURATION_MINUTES, Deadline, format_clock};
