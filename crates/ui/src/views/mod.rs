mod exam;
mod login;
mod results;
mod score;
mod scripts;
mod state;

pub use exam::ExamView;
pub use login::LoginView;
pub use results::ResultsView;
pub use score::ScoreView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
