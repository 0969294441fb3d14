//! Announcements view: severity-badged list, create and delete for admins.

use client::{AnnouncementKind, Role};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, Input, TextArea};
use ui::{use_announcements, use_auth};

use super::Shell;

fn badge_class(kind: AnnouncementKind) -> &'static str {
    match kind {
        AnnouncementKind::Info => "bg-sky-950 text-sky-400 border border-sky-800",
        AnnouncementKind::Warning => "bg-amber-950 text-amber-400 border border-amber-800",
        AnnouncementKind::Urgent => "bg-red-950 text-red-400 border border-red-800",
    }
}

#[component]
pub fn Announcements() -> Element {
    let auth = use_auth();
    let announcements = use_announcements();
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut kind = use_signal(|| AnnouncementKind::Info);

    let profile = auth().profile;
    let is_admin = profile.as_ref().map(|p| p.role) == Some(Role::Admin);
    let user_id = profile.map(|p| p.id).unwrap_or_default();

    let author_id = user_id.clone();
    let handle_create = move |evt: FormEvent| {
        evt.prevent_default();
        let author_id = author_id.clone();
        spawn(async move {
            let t = title().trim().to_string();
            let c = content().trim().to_string();
            if t.is_empty() || c.is_empty() {
                return;
            }
            if announcements.create(&t, &c, kind(), &author_id).await {
                title.set(String::new());
                content.set(String::new());
                kind.set(AnnouncementKind::Info);
            }
        });
    };

    rsx! {
        Shell {
            active: "/announcements",

            h1 { class: "text-2xl font-bold text-neutral-100 mb-6", "Announcements" }

            if is_admin {
                Card {
                    class: "mb-8",
                    h2 { class: "text-neutral-100 font-semibold mb-4", "New announcement" }
                    form {
                        onsubmit: handle_create,
                        class: "flex flex-col gap-3",
                        Input {
                            placeholder: "Title",
                            value: title(),
                            oninput: move |evt: FormEvent| title.set(evt.value()),
                        }
                        TextArea {
                            placeholder: "Announcement text",
                            value: content(),
                            oninput: move |evt: FormEvent| content.set(evt.value()),
                        }
                        select {
                            class: "px-3 py-2 rounded bg-neutral-900 border border-neutral-700 text-neutral-100 text-sm w-40",
                            onchange: move |evt: FormEvent| {
                                kind.set(AnnouncementKind::from_wire(Some(evt.value().as_str())));
                            },
                            option { value: "info", "Info" }
                            option { value: "warning", "Warning" }
                            option { value: "urgent", "Urgent" }
                        }
                        Button { r#type: "submit", "Publish" }
                    }
                }
            }

            if (announcements.is_loading)() {
                p { class: "text-neutral-500", "Loading announcements..." }
            } else if announcements.announcements.read().is_empty() {
                p { class: "text-neutral-500", "No announcements yet." }
            } else {
                div {
                    class: "flex flex-col gap-4",
                    for a in announcements.announcements.read().clone() {
                        Card {
                            class: "p-4",
                            div {
                                class: "flex justify-between items-start gap-4",
                                div {
                                    div {
                                        class: "flex items-center gap-2",
                                        h3 { class: "text-neutral-100 font-medium", "{a.title}" }
                                        span {
                                            class: "text-xs px-2 py-0.5 rounded {badge_class(a.kind)}",
                                            "{a.kind}"
                                        }
                                    }
                                    p { class: "text-neutral-400 text-sm mt-1", "{a.content}" }
                                    p { class: "text-neutral-500 text-xs mt-2", "{a.author_name}" }
                                }
                                if is_admin {
                                    Button {
                                        variant: ButtonVariant::Danger,
                                        onclick: {
                                            let id = a.id.clone();
                                            move |_| {
                                                let id = id.clone();
                                                spawn(async move {
                                                    announcements.delete(&id).await;
                                                });
                                            }
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
