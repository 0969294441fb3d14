//! Student and admin dashboards.

use dioxus::prelude::*;
use ui::components::{Button, Card};
use ui::{use_announcements, use_auth, use_forum, use_notes};

use super::Shell;
use crate::Route;

/// Student landing page: quick links plus the latest announcements.
#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let announcements = use_announcements();
    let name = auth()
        .profile
        .map(|p| p.name)
        .unwrap_or_default();

    rsx! {
        Shell {
            active: "/dashboard",

            h1 {
                class: "text-2xl font-bold text-neutral-100 mb-1",
                "Welcome back, {name}"
            }
            p {
                class: "text-neutral-400 mb-6",
                "Pick up where you left off."
            }

            div {
                class: "grid grid-cols-1 md:grid-cols-3 gap-4 mb-8",
                Card {
                    h2 { class: "text-neutral-100 font-semibold mb-2", "Course Notes" }
                    p { class: "text-neutral-400 text-sm mb-4", "Slides, labs, and reading material." }
                    Button {
                        onclick: move |_| { nav.push(Route::Notes {}); },
                        "Browse notes"
                    }
                }
                Card {
                    h2 { class: "text-neutral-100 font-semibold mb-2", "Discussion Forum" }
                    p { class: "text-neutral-400 text-sm mb-4", "Ask questions, help your peers." }
                    Button {
                        onclick: move |_| { nav.push(Route::Forum {}); },
                        "Open forum"
                    }
                }
                Card {
                    h2 { class: "text-neutral-100 font-semibold mb-2", "Quiz" }
                    p { class: "text-neutral-400 text-sm mb-4", "Network Security Basics — 30 minutes." }
                    Button {
                        onclick: move |_| { nav.push(Route::TakeQuiz {}); },
                        "Start quiz"
                    }
                }
            }

            h2 { class: "text-lg font-semibold text-neutral-100 mb-3", "Latest announcements" }
            if (announcements.is_loading)() {
                p { class: "text-neutral-500", "Loading..." }
            } else if announcements.announcements.read().is_empty() {
                p { class: "text-neutral-500", "Nothing yet." }
            } else {
                div {
                    class: "flex flex-col gap-3",
                    for a in announcements.announcements.read().iter().take(3).cloned() {
                        Card {
                            class: "p-4",
                            h3 { class: "text-neutral-100 font-medium", "{a.title}" }
                            p { class: "text-neutral-400 text-sm", "{a.content}" }
                        }
                    }
                }
            }
        }
    }
}

/// Admin landing page: content totals and shortcuts to the management views.
#[component]
pub fn AdminDashboard() -> Element {
    let nav = use_navigator();
    let notes = use_notes();
    let forum = use_forum();
    let announcements = use_announcements();

    rsx! {
        Shell {
            active: "/admin",

            h1 {
                class: "text-2xl font-bold text-neutral-100 mb-6",
                "Admin Dashboard"
            }

            div {
                class: "grid grid-cols-1 md:grid-cols-3 gap-4 mb-8",
                StatCard { label: "Notes", value: notes.notes.read().len() }
                StatCard { label: "Forum topics", value: forum.posts.read().len() }
                StatCard { label: "Announcements", value: announcements.announcements.read().len() }
            }

            div {
                class: "flex gap-3",
                Button {
                    onclick: move |_| { nav.push(Route::Notes {}); },
                    "Manage notes"
                }
                Button {
                    onclick: move |_| { nav.push(Route::QuizBuilder {}); },
                    "Build a quiz"
                }
                Button {
                    onclick: move |_| { nav.push(Route::Announcements {}); },
                    "Post an announcement"
                }
            }
        }
    }
}

#[component]
fn StatCard(label: String, value: usize) -> Element {
    rsx! {
        Card {
            class: "text-center",
            div { class: "text-3xl font-bold text-emerald-500", "{value}" }
            div { class: "text-neutral-400 text-sm mt-1", "{label}" }
        }
    }
}
