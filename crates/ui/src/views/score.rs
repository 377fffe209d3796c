use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::AttemptOutcome;

use super::scripts::prevent_back_script;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::donut_slices;

#[derive(Clone, Debug, PartialEq)]
struct ScoreData {
    outcome: AttemptOutcome,
    username: String,
    exam_name: String,
}

#[component]
pub fn ScoreView() -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.results_service();
    let navigator = use_navigator();

    use_effect(move || {
        let _ = eval(&prevent_back_script());
    });

    let results_for_load = results.clone();
    let resource = use_resource(move || {
        let results = results_for_load.clone();
        async move {
            let Some(outcome) = results
                .load_outcome()
                .await
                .map_err(|_| ViewError::Unknown)?
            else {
                return Ok::<_, ViewError>(None);
            };
            let (username, exam_name) = results
                .display_names()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(Some(ScoreData {
                outcome,
                username,
                exam_name,
            }))
        }
    });
    let state = view_state_from_resource(resource);

    // Nothing submitted in this session: there is no score to show.
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

    rsx! {
        div { class: "page score-page",
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
                ViewState::Ready(Some(data)) => rsx! {
                    ScoreSummary { data: data.clone(), on_exit }
                },
            }
        }
    }
}

#[component]
fn ScoreSummary(data: ScoreData, on_exit: EventHandler<()>) -> Element {
    let navigator = use_navigator();
    let report = data.outcome.score_report();
    let slices = donut_slices(report.correct, report.wrong, report.unanswered);
    let percentage = report.percentage();

    rsx! {
        header { class: "score-header",
            h1 { "{data.exam_name}" }
            p { class: "score-header__candidate", "Results for {data.username}" }
        }

        div { class: "score-body",
            div { class: "score-chart",
                svg {
                    view_box: "0 0 200 200",
                    width: "200",
                    height: "200",
                    for slice in &slices {
                        path { d: "{slice.path}", class: "{slice.class}" }
                    }
                    circle { cx: "100", cy: "100", r: "48", class: "chart-hole" }
                    text {
                        x: "100",
                        y: "108",
                        text_anchor: "middle",
                        class: "chart-percent",
                        "{percentage}%"
                    }
                }
                ul { class: "score-totals",
                    li { class: "score-total score-total--correct",
                        "Correct: {report.correct}"
                    }
                    li { class: "score-total score-total--wrong",
                        "Wrong: {report.wrong}"
                    }
                    li { class: "score-total score-total--unanswered",
                        "Unanswered: {report.unanswered}"
                    }
                    li { class: "score-total",
                        "Total: {report.total}"
                    }
                }
            }

            table { class: "score-sections",
                thead {
                    tr {
                        th { "Section" }
                        th { "Correct" }
                        th { "Wrong" }
                        th { "Unanswered" }
                        th { "Score" }
                    }
                }
                tbody {
                    for section in &report.sections {
                        tr {
                            td { "{section.name}" }
                            td { "{section.correct}" }
                            td { "{section.wrong}" }
                            td { "{section.unanswered}" }
                            td { "{section.percentage()}%" }
                        }
                    }
                }
            }
        }

        footer { class: "score-actions",
            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    let _ = navigator.push(Route::Results {});
                },
                "View Answers"
            }
            button {
                class: "btn btn-ghost",
                onclick: move |_| on_exit.call(()),
                "Exit to Login"
            }
        }
    }
}
