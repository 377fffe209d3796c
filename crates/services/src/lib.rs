#![forbid(unsafe_code)]

pub mod api;
pub mod attempt_service;
pub mod error;
pub mod login_service;
pub mod results_service;

pub use exam_core::Clock;

pub use api::{AttemptInfo, ExamApi, ExamClient, ExamClientConfig, ExamInfo, SubmittedAnswer};
pub use attempt_service::{
    AttemptGate, AttemptService, LoadedAttempt, QuestionSource, SubmitReason,
};
pub use error::{ApiError, AttemptError, LoginError, ResultsError};
pub use login_service::{ExamListing, LoginService};
pub use results_service::{AttemptOutcome, ResultsService};
