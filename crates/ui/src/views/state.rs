use dioxus::prelude::*;
use services::LoginError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    MissingInput,
    AuthRejected,
    Unreachable,
    EmptyCatalog,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::MissingInput => "Please enter both username and password.",
            ViewError::AuthRejected => "Invalid username or password.",
            ViewError::Unreachable => "Cannot reach the exam server. Check your connection.",
            ViewError::EmptyCatalog => "No exams are available right now.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    #[must_use]
    pub fn from_login(err: &LoginError) -> Self {
        match err {
            LoginError::MissingInput => ViewError::MissingInput,
            LoginError::AuthRejected => ViewError::AuthRejected,
            LoginError::Unreachable => ViewError::Unreachable,
            LoginError::EmptyCatalog => ViewError::EmptyCatalog,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
