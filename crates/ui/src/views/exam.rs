use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use exam_core::model::{Deadline, QuestionStatus, SessionContext};
use services::{AttemptGate, QuestionSource, SubmitReason};

use super::scripts::prevent_back_script;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AttemptIntent, AttemptVm, status_class, status_label, timer_label};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const LEGEND_STATUSES: [QuestionStatus; 5] = [
    QuestionStatus::Answered,
    QuestionStatus::NotAnswered,
    QuestionStatus::Marked,
    QuestionStatus::AnsMarked,
    QuestionStatus::NotVisited,
];

#[component]
pub fn ExamView() -> Element {
    let ctx = use_context::<AppContext>();
    let attempts = ctx.attempt_service();
    let navigator = use_navigator();

    let vm = use_signal(|| None::<AttemptVm>);
    let deadline = use_signal(|| None::<Deadline>);
    let session_ctx = use_signal(|| None::<SessionContext>);
    let source = use_signal(|| None::<QuestionSource>);
    let remaining = use_signal(|| 0_i64);
    let submitting = use_signal(|| false);
    let error = use_signal(|| None::<ViewError>);

    use_effect(move || {
        let _ = eval(&prevent_back_script());
    });

    // Gate, fetch/resume, and deadline all happen before anything renders.
    let attempts_for_boot = attempts.clone();
    let resource = use_resource(move || {
        let attempts = attempts_for_boot.clone();
        let mut vm = vm;
        let mut deadline = deadline;
        let mut session_ctx = session_ctx;
        let mut source = source;
        let mut remaining = remaining;

        async move {
            let gate = attempts.gate().await.map_err(|_| ViewError::Unknown)?;
            let context = match gate {
                AttemptGate::RedirectLogin => {
                    let _ = navigator.replace(Route::Login {});
                    return Ok(());
                }
                AttemptGate::RedirectScore => {
                    let _ = navigator.replace(Route::Score {});
                    return Ok(());
                }
                AttemptGate::Ready(context) => context,
            };

            let loaded = attempts
                .start_attempt(&context)
                .await
                .map_err(|_| ViewError::Unknown)?;
            let dl = attempts
                .ensure_deadline()
                .await
                .map_err(|_| ViewError::Unknown)?;

            remaining.set(dl.remaining_seconds(attempts.clock().now()));
            vm.set(Some(AttemptVm::new(loaded.session)));
            source.set(Some(loaded.source));
            session_ctx.set(Some(context));
            deadline.set(Some(dl));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    let do_submit = {
        let attempts = attempts.clone();
        use_callback(move |reason: SubmitReason| {
            if submitting() {
                return;
            }
            let Some(context) = session_ctx() else {
                return;
            };
            let Some(session) = vm.read().as_ref().map(|vm| vm.session().clone()) else {
                return;
            };
            let mut submitting = submitting;
            let mut error = error;
            submitting.set(true);
            let attempts = attempts.clone();
            spawn(async move {
                match attempts.submit(&context, &session, reason).await {
                    Ok(()) => {
                        let _ = navigator.replace(Route::Score {});
                    }
                    Err(_) => {
                        submitting.set(false);
                        error.set(Some(ViewError::Unknown));
                    }
                }
            });
        })
    };

    // One ticking task per mounted view; dropped with the component scope.
    // An already-expired deadline submits on the first tick.
    let clock = attempts.clock();
    let mut timer_started = use_signal(|| false);
    use_effect(move || {
        let Some(dl) = deadline() else {
            return;
        };
        if timer_started() {
            return;
        }
        timer_started.set(true);
        let mut remaining = remaining;
        spawn(async move {
            loop {
                let left = dl.remaining_seconds(clock.now());
                remaining.set(left);
                if left <= 0 {
                    do_submit.call(SubmitReason::TimerExpiry);
                    return;
                }
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        });
    });

    let dispatch = {
        let attempts = attempts.clone();
        use_callback(move |intent: AttemptIntent| {
            let mut vm = vm;
            let changed = vm.write().as_mut().is_some_and(|vm| vm.apply(intent));
            if !changed {
                return;
            }
            let Some(session) = vm.read().as_ref().map(|vm| vm.session().clone()) else {
                return;
            };
            let attempts = attempts.clone();
            let mut error = error;
            spawn(async move {
                if attempts.persist_progress(&session).await.is_err() {
                    error.set(Some(ViewError::Unknown));
                }
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ExamTestHandles>() {
                handles.register(dispatch, do_submit, vm);
            }
        }
    }

    let context_value = session_ctx();
    let source_value = source();
    let remaining_value = remaining();
    let error_value = error();
    let vm_guard = vm.read();
    let attempt = vm_guard.as_ref();

    rsx! {
        div { class: "page exam-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading exam..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(()) => rsx! {
                    if let (Some(vm), Some(context)) = (attempt, context_value.as_ref()) {
                        header { class: "exam-header",
                            div { class: "exam-header__titles",
                                h1 { class: "exam-header__name", "{context.exam_name}" }
                                span { class: "exam-header__candidate", "Candidate: {context.username}" }
                            }
                            span { class: "exam-header__timer", "{timer_label(remaining_value)}" }
                            button {
                                class: "btn btn-submit",
                                disabled: submitting(),
                                onclick: move |_| do_submit.call(SubmitReason::Manual),
                                if submitting() { "Submitting..." } else { "Submit Exam" }
                            }
                        }

                        if source_value == Some(QuestionSource::Placeholder) {
                            p { class: "exam-banner",
                                "Question download failed. Showing practice questions instead."
                            }
                        }
                        if let Some(err) = error_value {
                            p { class: "form-error", "{err.message()}" }
                        }

                        nav { class: "section-tabs",
                            for (index, section) in vm.session().sections().iter().enumerate() {
                                button {
                                    class: if index == vm.session().current_section_index() {
                                        "section-tab section-tab--active"
                                    } else {
                                        "section-tab"
                                    },
                                    onclick: move |_| dispatch.call(AttemptIntent::JumpToSection(index)),
                                    "Part {section.part_number}: {section.name}"
                                }
                            }
                        }

                        div { class: "exam-body",
                            if let Some(question) = vm.session().current_question() {
                                section { class: "question-panel",
                                    h2 { class: "question-panel__number",
                                        "Question {question.number()} of {vm.session().total_questions()}"
                                    }
                                    p { class: "question-panel__text", "{question.text()}" }
                                    div { class: "question-options",
                                        for (index, option) in question.options().iter().enumerate() {
                                            button {
                                                class: if question.selected_option() == Some(index) {
                                                    "option-btn option-btn--selected"
                                                } else {
                                                    "option-btn"
                                                },
                                                onclick: move |_| dispatch.call(AttemptIntent::Select(index)),
                                                "{option}"
                                            }
                                        }
                                    }
                                    div { class: "question-actions",
                                        button {
                                            class: "btn btn-primary",
                                            onclick: move |_| dispatch.call(AttemptIntent::SaveAndNext),
                                            "Save & Next"
                                        }
                                        button {
                                            class: "btn btn-secondary",
                                            onclick: move |_| dispatch.call(AttemptIntent::MarkForReview),
                                            "Mark for Review"
                                        }
                                        button {
                                            class: "btn btn-ghost",
                                            onclick: move |_| dispatch.call(AttemptIntent::ClearResponse),
                                            "Clear Response"
                                        }
                                    }
                                }
                            }

                            aside { class: "palette",
                                h3 { class: "palette__title", "Questions" }
                                div { class: "palette__grid",
                                    for (index, question) in vm.session().questions().iter().enumerate() {
                                        button {
                                            class: if index == vm.session().current_index() {
                                                format!("{} palette-btn--current", status_class(question.status()))
                                            } else {
                                                status_class(question.status()).to_string()
                                            },
                                            onclick: move |_| dispatch.call(AttemptIntent::JumpToQuestion(index)),
                                            "{question.number()}"
                                        }
                                    }
                                }
                                ul { class: "palette__legend",
                                    for status in LEGEND_STATUSES {
                                        li { class: "legend-item",
                                            span { class: "legend-swatch {status_class(status)}" }
                                            span { "{status_label(status)}: {legend_count(vm, status)}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

fn legend_count(vm: &AttemptVm, status: QuestionStatus) -> u32 {
    let counts = vm.status_counts();
    match status {
        QuestionStatus::NotVisited => counts.not_visited,
        QuestionStatus::NotAnswered => counts.not_answered,
        QuestionStatus::Answered => counts.answered,
        QuestionStatus::Marked => counts.marked,
        QuestionStatus::AnsMarked => counts.ans_marked,
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ExamTestHandles {
    dispatch: Rc<RefCell<Option<Callback<AttemptIntent>>>>,
    submit: Rc<RefCell<Option<Callback<SubmitReason>>>>,
    vm: Rc<RefCell<Option<Signal<Option<AttemptVm>>>>>,
}

#[cfg(test)]
impl ExamTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<AttemptIntent>,
        submit: Callback<SubmitReason>,
        vm: Signal<Option<AttemptVm>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.submit.borrow_mut() = Some(submit);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<AttemptIntent> {
        (*self.dispatch.borrow()).expect("exam dispatch registered")
    }

    pub(crate) fn submit(&self) -> Callback<SubmitReason> {
        (*self.submit.borrow()).expect("exam submit registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<AttemptVm>> {
        (*self.vm.borrow()).expect("exam vm registered")
    }
}
