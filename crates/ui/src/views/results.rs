use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use exam_core::model::AnswerVerdict;
use services::AttemptOutcome;

use super::scripts::prevent_back_script;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.results_service();
    let navigator = use_navigator();

    let mut index = use_signal(|| 0_usize);

    use_effect(move || {
        let _ = eval(&prevent_back_script());
    });

    let results_for_load = results.clone();
    let resource = use_resource(move || {
        let results = results_for_load.clone();
        async move {
            results
                .load_outcome()
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });
    let state = view_state_from_resource(resource);

    use_effect(move || {
        if matches!(view_state_from_resource(resource), ViewState::Ready(None)) {
            let _ = navigator.replace(Route::Login {});
        }
    });

    let on_exit = {
        let results = results.clone();
        use_callback(move |()| {
            let results = results.clone();
            spawn(async move {
                if let Err(err) = results.exit_to_login().await {
                    tracing::warn!(error = %err, "failed to clear session on exit");
                }
                let _ = navigator.replace(Route::Login {});
            });
        })
    };

    let total = match &state {
        ViewState::Ready(Some(outcome)) => outcome.results.len(),
        _ => 0,
    };
    let on_prev = use_callback(move |()| {
        if index() > 0 {
            index.set(index() - 1);
        }
    });
    let on_next = use_callback(move |()| {
        if index() + 1 < total {
            index.set(index() + 1);
        }
    });
    let on_jump = use_callback(move |target: usize| {
        if target < total {
            index.set(target);
        }
    });

    rsx! {
        div { class: "page results-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(None) => rsx! {
                    p { "Redirecting..." }
                },
                ViewState::Ready(Some(outcome)) => rsx! {
                    AnswerReview {
                        outcome: outcome.clone(),
                        index: index().min(outcome.results.len().saturating_sub(1)),
                        on_prev,
                        on_next,
                        on_jump,
                        on_exit,
                    }
                },
            }
        }
    }
}

#[component]
fn AnswerReview(
    outcome: AttemptOutcome,
    index: usize,
    on_prev: EventHandler<()>,
    on_next: EventHandler<()>,
    on_jump: EventHandler<usize>,
    on_exit: EventHandler<()>,
) -> Element {
    let total = outcome.results.len();
    let Some(result) = outcome.results.get(index) else {
        return rsx! {
            p { "No answers to review." }
        };
    };
    let verdict = result.verdict();
    let (verdict_class, verdict_text) = match verdict {
        AnswerVerdict::Correct => ("verdict verdict--correct", "Correct"),
        AnswerVerdict::Wrong => ("verdict verdict--wrong", "Incorrect"),
        AnswerVerdict::Unanswered => ("verdict verdict--unanswered", "Not Answered"),
    };

    rsx! {
        header { class: "results-header",
            h1 { "Answer Review" }
            button {
                class: "btn btn-ghost",
                onclick: move |_| on_exit.call(()),
                "Exit to Login"
            }
        }

        nav { class: "section-tabs",
            for section in outcome.sections.iter() {
                {
                    let start = section.start_index;
                    let active = section.contains(index);
                    rsx! {
                        button {
                            class: if active { "section-tab section-tab--active" } else { "section-tab" },
                            onclick: move |_| on_jump.call(start),
                            "Part {section.part_number}: {section.name}"
                        }
                    }
                }
            }
        }

        div { class: "exam-body",
            section { class: "question-panel",
                h2 { class: "question-panel__number",
                    "Question {result.number} of {total}"
                }
                p { class: "question-panel__section", "{result.section_name}" }
                p { class: "question-panel__text", "{result.text}" }
                span { class: "{verdict_class}", "{verdict_text}" }

                div { class: "question-options",
                    for (option_index, option) in result.options.iter().enumerate() {
                        div {
                            class: option_review_class(
                                option_index,
                                result.selected_option,
                                result.correct_option,
                            ),
                            "{option}"
                        }
                    }
                }

                div { class: "question-actions",
                    button {
                        class: "btn btn-secondary",
                        disabled: index == 0,
                        onclick: move |_| on_prev.call(()),
                        "Previous"
                    }
                    button {
                        class: "btn btn-secondary",
                        disabled: index + 1 >= total,
                        onclick: move |_| on_next.call(()),
                        "Next"
                    }
                }
            }

            aside { class: "palette",
                h3 { class: "palette__title", "Questions" }
                div { class: "palette__grid",
                    for (jump_index, jump_result) in outcome.results.iter().enumerate() {
                        button {
                            class: if jump_index == index {
                                format!("{} palette-btn--current", verdict_palette_class(jump_result.verdict()))
                            } else {
                                verdict_palette_class(jump_result.verdict()).to_string()
                            },
                            onclick: move |_| on_jump.call(jump_index),
                            "{jump_result.number}"
                        }
                    }
                }
            }
        }
    }
}

fn option_review_class(
    option_index: usize,
    selected: Option<usize>,
    correct: usize,
) -> &'static str {
    if option_index == correct {
        "option-review option-review--correct"
    } else if selected == Some(option_index) {
        "option-review option-review--wrong"
    } else {
        "option-review"
    }
}

fn verdict_palette_class(verdict: AnswerVerdict) -> &'static str {
    match verdict {
        AnswerVerdict::Correct => "palette-btn palette-btn--answered",
        AnswerVerdict::Wrong => "palette-btn palette-btn--not-answered",
        AnswerVerdict::Unanswered => "palette-btn palette-btn--not-visited",
    }
}
