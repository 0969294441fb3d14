//! Admin quiz builder: assemble questions into a draft and save it.

use client::Role;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, Input, TextArea};
use ui::{use_auth, use_toasts, DraftQuestion, QuestionKind, QuizDraft};

use super::Shell;
use crate::Route;

#[component]
pub fn QuizBuilder() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut draft = use_signal(QuizDraft::default);
    let mut question = use_signal(DraftQuestion::default);
    let mut form_error = use_signal(|| Option::<String>::None);

    // Students get bounced back to their dashboard
    let state = auth();
    if !state.loading {
        if state.profile.as_ref().map(|p| p.role) != Some(Role::Admin) {
            nav.replace(Route::Dashboard {});
            return rsx! {};
        }
    }

    let handle_add = move |_| {
        let candidate = question();
        match draft.write().add_question(candidate) {
            Ok(()) => {
                question.set(DraftQuestion::default());
                form_error.set(None);
            }
            Err(err) => form_error.set(Some(err.to_string())),
        }
    };

    let handle_save = move |_| match draft.read().save() {
        Ok(()) => toasts.success("Quiz saved."),
        Err(err) => toasts.error(err.to_string()),
    };

    let is_multiple_choice = question().kind == QuestionKind::MultipleChoice;

    rsx! {
        Shell {
            active: "/quiz",

            h1 { class: "text-2xl font-bold text-neutral-100 mb-6", "Quiz Builder" }

            Card {
                class: "mb-6",
                div {
                    class: "flex flex-col gap-3",
                    Input {
                        placeholder: "Quiz title",
                        value: draft.read().title.clone(),
                        oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                    }
                    TextArea {
                        placeholder: "Description",
                        rows: 2,
                        value: draft.read().description.clone(),
                        oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                    }
                }
            }

            Card {
                class: "mb-6",
                h2 { class: "text-neutral-100 font-semibold mb-4", "Add a question" }
                div {
                    class: "flex flex-col gap-3",

                    if let Some(err) = form_error() {
                        div {
                            class: "px-2.5 py-2.5 bg-red-950 border border-red-800 rounded text-red-400 text-[0.8125rem]",
                            "{err}"
                        }
                    }

                    TextArea {
                        placeholder: "Question text",
                        rows: 2,
                        value: question().text,
                        oninput: move |evt: FormEvent| question.write().text = evt.value(),
                    }

                    div {
                        class: "flex gap-3",
                        select {
                            class: "px-3 py-2 rounded bg-neutral-900 border border-neutral-700 text-neutral-100 text-sm",
                            onchange: move |evt: FormEvent| {
                                question.write().kind = match evt.value().as_str() {
                                    "short_answer" => QuestionKind::ShortAnswer,
                                    _ => QuestionKind::MultipleChoice,
                                };
                            },
                            option { value: "multiple_choice", "Multiple choice" }
                            option { value: "short_answer", "Short answer" }
                        }
                        Input {
                            class: "w-24",
                            r#type: "number",
                            placeholder: "Points",
                            value: question().points.to_string(),
                            oninput: move |evt: FormEvent| {
                                question.write().points = evt.value().parse().unwrap_or(0);
                            },
                        }
                    }

                    if is_multiple_choice {
                        for i in 0..4 {
                            Input {
                                placeholder: "Option {i + 1}",
                                value: question().options.get(i).cloned().unwrap_or_default(),
                                oninput: move |evt: FormEvent| {
                                    let mut q = question.write();
                                    if i < q.options.len() {
                                        q.options[i] = evt.value();
                                    }
                                },
                            }
                        }
                        Input {
                            placeholder: "Correct answer (must match an option)",
                            value: question().correct_answer,
                            oninput: move |evt: FormEvent| {
                                question.write().correct_answer = evt.value();
                            },
                        }
                    }

                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: handle_add,
                        "Add question"
                    }
                }
            }

            if !draft.read().questions().is_empty() {
                Card {
                    class: "mb-6",
                    h2 { class: "text-neutral-100 font-semibold mb-4", "Questions" }
                    div {
                        class: "flex flex-col gap-2",
                        for (i, q) in draft.read().questions().iter().cloned().enumerate() {
                            div {
                                class: "flex justify-between items-center bg-neutral-950 rounded p-3",
                                div {
                                    p { class: "text-neutral-200 text-sm", "{q.text}" }
                                    p { class: "text-neutral-500 text-xs", "{q.points} points" }
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    onclick: move |_| draft.write().remove_question(i),
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }

            Button { onclick: handle_save, "Save quiz" }
        }
    }
}
