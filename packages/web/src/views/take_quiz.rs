//! Quiz-taking view: one question at a time against a 30-minute countdown.

use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, TextArea};
use ui::icons::FaClock;
use ui::{Icon, Quiz, QuizAttempt};

use super::Shell;
use crate::Route;

#[component]
pub fn TakeQuiz() -> Element {
    let mut attempt = use_signal(|| QuizAttempt::new(Quiz::network_security_basics()));

    // Countdown loop. The attempt ignores ticks once it is submitted.
    use_effect(move || {
        spawn(async move {
            loop {
                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;

                if attempt.read().report.is_some() {
                    break;
                }
                attempt.write().tick();
            }
        });
    });

    if let Some(report) = attempt.read().report {
        return rsx! {
            Shell {
                active: "/quiz/take",
                ResultCard { score: report.score, total: report.total, percent: report.percent }
            }
        };
    }

    let snapshot = attempt.read();
    let quiz_title = snapshot.quiz().title.clone();
    let Some(question) = snapshot.current_question().cloned() else {
        return rsx! {
            Shell {
                active: "/quiz/take",
                p { class: "text-neutral-400", "This quiz has no questions yet." }
            }
        };
    };
    let answer = snapshot.answer_for(&question.id).to_string();
    let index = snapshot.current;
    let question_count = snapshot.quiz().questions.len();
    let time_left = snapshot.format_time_left();
    drop(snapshot);

    let question_id = question.id.clone();
    let textarea_id = question.id.clone();

    rsx! {
        Shell {
            active: "/quiz/take",

            div {
                class: "flex justify-between items-center mb-6",
                h1 { class: "text-2xl font-bold text-neutral-100", "{quiz_title}" }
                span {
                    class: "flex items-center gap-2 text-lg font-mono text-emerald-500",
                    Icon { width: 18, height: 18, fill: "currentColor", icon: FaClock }
                    "{time_left}"
                }
            }

            Card {
                p {
                    class: "text-neutral-500 text-sm mb-2",
                    "Question {index + 1} of {question_count} · {question.points} points"
                }
                h2 { class: "text-neutral-100 font-medium mb-4", "{question.text}" }

                if question.options.is_empty() {
                    TextArea {
                        placeholder: "Your answer...",
                        rows: 5,
                        value: answer.clone(),
                        oninput: move |evt: FormEvent| {
                            attempt.write().answer(&textarea_id, &evt.value());
                        },
                    }
                    p {
                        class: "text-neutral-500 text-xs mt-2",
                        "Short answers are reviewed by an instructor and not auto-scored."
                    }
                } else {
                    div {
                        class: "flex flex-col gap-2",
                        for option in question.options.clone() {
                            label {
                                class: if answer == option {
                                    "flex items-center gap-2 p-3 rounded border border-emerald-500 bg-neutral-950 cursor-pointer"
                                } else {
                                    "flex items-center gap-2 p-3 rounded border border-neutral-700 bg-neutral-950 cursor-pointer hover:border-neutral-500"
                                },
                                input {
                                    r#type: "radio",
                                    name: "question-{question_id}",
                                    value: "{option}",
                                    checked: answer == option,
                                    onchange: {
                                        let question_id = question_id.clone();
                                        let option = option.clone();
                                        move |_| {
                                            attempt.write().answer(&question_id, &option);
                                        }
                                    },
                                }
                                span { class: "text-neutral-200 text-sm", "{option}" }
                            }
                        }
                    }
                }

                div {
                    class: "flex justify-between mt-6",
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: index == 0,
                        onclick: move |_| attempt.write().prev(),
                        "Previous"
                    }
                    if index + 1 < question_count {
                        Button {
                            onclick: move |_| attempt.write().next(),
                            "Next"
                        }
                    } else {
                        Button {
                            onclick: move |_| attempt.write().submit(),
                            "Submit quiz"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ResultCard(score: u32, total: u32, percent: u32) -> Element {
    let nav = use_navigator();
    rsx! {
        Card {
            class: "text-center",
            h1 { class: "text-2xl font-bold text-neutral-100 mb-2", "Quiz submitted" }
            p {
                class: "text-4xl font-bold text-emerald-500 mb-2",
                "{percent}%"
            }
            p {
                class: "text-neutral-400 mb-1",
                "{score} of {total} auto-scored points"
            }
            p {
                class: "text-neutral-500 text-sm mb-6",
                "Short-answer questions are graded by an instructor."
            }
            Button {
                onclick: move |_| { nav.push(Route::Dashboard {}); },
                "Back to dashboard"
            }
        }
    }
}
