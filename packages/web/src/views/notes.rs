//! Notes library view: list and download for everyone, upload and delete for
//! admins.

use client::notes::FileUpload;
use client::{Note, Role};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, Input, TextArea};
use ui::{use_auth, use_notes};

use super::{save_file, Shell};

#[component]
pub fn Notes() -> Element {
    let auth = use_auth();
    let notes = use_notes();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut picked_file = use_signal(|| Option::<FileUpload>::None);
    let mut uploading = use_signal(|| false);

    let profile = auth().profile;
    let is_admin = profile.as_ref().map(|p| p.role) == Some(Role::Admin);
    let user_id = profile.map(|p| p.id).unwrap_or_default();

    let handle_pick = move |evt: FormEvent| async move {
        let Some(file_engine) = evt.files() else {
            return;
        };
        let Some(name) = file_engine.files().into_iter().next() else {
            return;
        };
        match file_engine.read_file(&name).await {
            Some(bytes) => picked_file.set(Some(FileUpload { name, bytes })),
            None => tracing::error!("could not read picked file {name}"),
        }
    };

    let author_id = user_id.clone();
    let handle_upload = move |evt: FormEvent| {
        evt.prevent_default();
        let author_id = author_id.clone();
        spawn(async move {
            let Some(file) = picked_file() else {
                return;
            };
            if title().trim().is_empty() {
                return;
            }
            uploading.set(true);
            if notes
                .upload(title().trim(), description().trim(), file, &author_id)
                .await
            {
                title.set(String::new());
                description.set(String::new());
                picked_file.set(None);
            }
            uploading.set(false);
        });
    };

    rsx! {
        Shell {
            active: "/notes",

            h1 { class: "text-2xl font-bold text-neutral-100 mb-6", "Course Notes" }

            if is_admin {
                Card {
                    class: "mb-8",
                    h2 { class: "text-neutral-100 font-semibold mb-4", "Upload a note" }
                    form {
                        onsubmit: handle_upload,
                        class: "flex flex-col gap-3",
                        Input {
                            placeholder: "Title",
                            value: title(),
                            oninput: move |evt: FormEvent| title.set(evt.value()),
                        }
                        TextArea {
                            placeholder: "Description (optional)",
                            rows: 2,
                            value: description(),
                            oninput: move |evt: FormEvent| description.set(evt.value()),
                        }
                        input {
                            r#type: "file",
                            class: "text-sm text-neutral-400",
                            onchange: handle_pick,
                        }
                        if let Some(file) = picked_file() {
                            p { class: "text-neutral-500 text-sm", "Selected: {file.name}" }
                        }
                        Button {
                            r#type: "submit",
                            disabled: uploading() || picked_file().is_none(),
                            if uploading() { "Uploading..." } else { "Upload" }
                        }
                    }
                }
            }

            if (notes.is_loading)() {
                p { class: "text-neutral-500", "Loading notes..." }
            } else if notes.notes.read().is_empty() {
                p { class: "text-neutral-500", "No notes have been uploaded yet." }
            } else {
                div {
                    class: "flex flex-col gap-4",
                    for note in notes.notes.read().clone() {
                        NoteCard { note, is_admin, notes }
                    }
                }
            }
        }
    }
}

#[component]
fn NoteCard(note: Note, is_admin: bool, notes: ui::UseNotes) -> Element {
    let download_note = note.clone();
    let delete_id = note.id.clone();

    rsx! {
        Card {
            class: "p-4",
            div {
                class: "flex justify-between items-start gap-4",
                div {
                    h3 { class: "text-neutral-100 font-medium", "{note.title}" }
                    if !note.description.is_empty() {
                        p { class: "text-neutral-400 text-sm mt-1", "{note.description}" }
                    }
                    p {
                        class: "text-neutral-500 text-xs mt-2",
                        "{note.file_name} · {note.file_type} · {note.download_count} downloads"
                    }
                }
                div {
                    class: "flex gap-2 shrink-0",
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| {
                            let note = download_note.clone();
                            spawn(async move {
                                if let Some(file) = notes.download(&note).await {
                                    save_file(&file);
                                }
                            });
                        },
                        "Download"
                    }
                    if is_admin {
                        Button {
                            variant: ButtonVariant::Danger,
                            onclick: move |_| {
                                let id = delete_id.clone();
                                spawn(async move {
                                    notes.delete(&id).await;
                                });
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
