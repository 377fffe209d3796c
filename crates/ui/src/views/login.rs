use dioxus::prelude::*;
use dioxus_router::use_navigator;

use exam_core::model::ExamId;
use services::{ExamListing, LoginService};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq)]
enum LoginStage {
    Credentials,
    Picker {
        token: String,
        username: String,
        listings: Vec<ExamListing>,
    },
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let logins = ctx.login_service();
    let navigator = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let busy = use_signal(|| false);
    let error = use_signal(|| None::<ViewError>);
    let stage = use_signal(|| LoginStage::Credentials);

    // A previous run may have left a half-finished hand-off behind.
    let _reset = {
        let logins = logins.clone();
        use_resource(move || {
            let logins = logins.clone();
            async move {
                if let Err(err) = logins.reset_stale_state().await {
                    tracing::warn!(error = %err, "failed to clear stale session state");
                }
            }
        })
    };

    let on_submit = {
        let logins = logins.clone();
        use_callback(move |()| {
            if busy() {
                return;
            }
            let logins = logins.clone();
            let mut busy = busy;
            let mut error = error;
            let mut stage = stage;
            let user = username();
            let pass = password();
            spawn(async move {
                busy.set(true);
                error.set(None);
                match sign_in(&logins, &user, &pass).await {
                    Ok((token, listings)) => stage.set(LoginStage::Picker {
                        token,
                        username: user,
                        listings,
                    }),
                    Err(err) => error.set(Some(err)),
                }
                busy.set(false);
            });
        })
    };

    let on_pick = {
        let logins = logins.clone();
        use_callback(move |(exam_id, exam_name): (ExamId, String)| {
            let LoginStage::Picker {
                token, username, ..
            } = stage()
            else {
                return;
            };
            let logins = logins.clone();
            let mut error = error;
            spawn(async move {
                match logins
                    .begin_session(&token, &username, exam_id, &exam_name)
                    .await
                {
                    Ok(_) => {
                        let _ = navigator.replace(Route::Exam {});
                    }
                    Err(_) => error.set(Some(ViewError::Unknown)),
                }
            });
        })
    };

    let stage_value = stage();
    let error_value = error();

    rsx! {
        div { class: "page login-page",
            div { class: "login-card",
                h1 { class: "login-title", "ExamDesk" }

                if let Some(err) = error_value {
                    p { class: "form-error", "{err.message()}" }
                }

                match stage_value {
                    LoginStage::Credentials => rsx! {
                        form {
                            class: "login-form",
                            onsubmit: move |evt| {
                                evt.prevent_default();
                                on_submit.call(());
                            },
                            label { r#for: "login-username", "Username" }
                            input {
                                id: "login-username",
                                r#type: "text",
                                autofocus: true,
                                value: "{username}",
                                oninput: move |evt| username.set(evt.value()),
                            }
                            label { r#for: "login-password", "Password" }
                            input {
                                id: "login-password",
                                r#type: "password",
                                value: "{password}",
                                oninput: move |evt| password.set(evt.value()),
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "submit",
                                disabled: busy(),
                                if busy() { "Signing in..." } else { "Sign In" }
                            }
                        }
                    },
                    LoginStage::Picker { listings, username: user, .. } => rsx! {
                        p { class: "login-welcome", "Welcome, {user}. Choose an exam to begin." }
                        ul { class: "exam-list",
                            for listing in listings {
                                ExamRow { listing: listing.clone(), on_pick }
                            }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn ExamRow(listing: ExamListing, on_pick: EventHandler<(ExamId, String)>) -> Element {
    let score_line = match (listing.score, listing.total) {
        (Some(score), Some(total)) => Some(format!("Last score: {score}/{total}")),
        _ => None,
    };
    let id = listing.id;
    let name = listing.name.clone();

    rsx! {
        li { class: "exam-row",
            div { class: "exam-row__info",
                span { class: "exam-row__name", "{listing.name}" }
                span { class: "exam-row__duration", "{listing.duration_minutes} minutes" }
                if let Some(line) = score_line {
                    span { class: "exam-row__score", "{line}" }
                }
            }
            // Attempted exams stay visible but cannot be taken again.
            button {
                class: "btn btn-primary",
                disabled: listing.attempted,
                onclick: move |_| on_pick.call((id, name.clone())),
                if listing.attempted { "Completed" } else { "Start" }
            }
        }
    }
}

async fn sign_in(
    logins: &LoginService,
    username: &str,
    password: &str,
) -> Result<(String, Vec<ExamListing>), ViewError> {
    let token = logins
        .login(username, password)
        .await
        .map_err(|err| ViewError::from_login(&err))?;
    let listings = logins
        .load_catalog(&token)
        .await
        .map_err(|err| ViewError::from_login(&err))?;
    Ok((token, listings))
}
