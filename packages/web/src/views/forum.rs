//! Discussion forum view: topic list with expandable replies, plus forms for
//! new topics and replies.

use client::ForumPost;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, Input, TextArea};
use ui::{use_auth, use_forum};

use super::Shell;

#[component]
pub fn Forum() -> Element {
    let auth = use_auth();
    let forum = use_forum();
    let mut show_new_topic = use_signal(|| false);
    let mut new_title = use_signal(String::new);
    let mut new_content = use_signal(String::new);
    let expanded = use_signal(|| Option::<String>::None);

    let user_id = auth().profile.map(|p| p.id).unwrap_or_default();

    let author_id = user_id.clone();
    let handle_new_topic = move |evt: FormEvent| {
        evt.prevent_default();
        let author_id = author_id.clone();
        spawn(async move {
            let title = new_title().trim().to_string();
            let content = new_content().trim().to_string();
            if title.is_empty() || content.is_empty() {
                return;
            }
            if forum.create_topic(&title, &content, &author_id).await {
                new_title.set(String::new());
                new_content.set(String::new());
                show_new_topic.set(false);
            }
        });
    };

    rsx! {
        Shell {
            active: "/forum",

            div {
                class: "flex justify-between items-center mb-6",
                h1 { class: "text-2xl font-bold text-neutral-100", "Discussion Forum" }
                Button {
                    onclick: move |_| show_new_topic.set(!show_new_topic()),
                    if show_new_topic() { "Cancel" } else { "New topic" }
                }
            }

            if show_new_topic() {
                Card {
                    class: "mb-6",
                    form {
                        onsubmit: handle_new_topic,
                        class: "flex flex-col gap-3",
                        Input {
                            placeholder: "Topic title",
                            value: new_title(),
                            oninput: move |evt: FormEvent| new_title.set(evt.value()),
                        }
                        TextArea {
                            placeholder: "What do you want to discuss?",
                            value: new_content(),
                            oninput: move |evt: FormEvent| new_content.set(evt.value()),
                        }
                        Button { r#type: "submit", "Post topic" }
                    }
                }
            }

            if (forum.is_loading)() {
                p { class: "text-neutral-500", "Loading topics..." }
            } else if forum.posts.read().is_empty() {
                p { class: "text-neutral-500", "No topics yet. Start the first discussion!" }
            } else {
                div {
                    class: "flex flex-col gap-4",
                    for post in forum.posts.read().clone() {
                        TopicCard { post, forum, expanded, user_id: user_id.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn TopicCard(
    post: ForumPost,
    forum: ui::UseForum,
    expanded: Signal<Option<String>>,
    user_id: String,
) -> Element {
    let mut expanded = expanded;
    let mut reply_text = use_signal(String::new);
    let is_open = expanded() == Some(post.id.clone());
    let toggle_id = post.id.clone();
    let reply_topic_id = post.id.clone();

    let handle_reply = move |evt: FormEvent| {
        evt.prevent_default();
        let topic_id = reply_topic_id.clone();
        let author_id = user_id.clone();
        spawn(async move {
            let content = reply_text().trim().to_string();
            if content.is_empty() {
                return;
            }
            if forum.create_reply(&topic_id, &content, &author_id).await {
                reply_text.set(String::new());
            }
        });
    };

    rsx! {
        Card {
            class: "p-4",
            div {
                class: "flex justify-between items-start gap-4",
                div {
                    h3 { class: "text-neutral-100 font-medium", "{post.title}" }
                    p { class: "text-neutral-400 text-sm mt-1", "{post.content}" }
                    p {
                        class: "text-neutral-500 text-xs mt-2",
                        "{post.author_name} · {post.author_role} · {post.reply_count} replies"
                    }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| {
                        if expanded() == Some(toggle_id.clone()) {
                            expanded.set(None);
                        } else {
                            expanded.set(Some(toggle_id.clone()));
                        }
                    },
                    if is_open { "Hide replies" } else { "Show replies" }
                }
            }

            if is_open {
                div {
                    class: "mt-4 border-t border-neutral-800 pt-4 flex flex-col gap-3",
                    if post.replies.is_empty() {
                        p { class: "text-neutral-500 text-sm", "No replies yet." }
                    }
                    for reply in post.replies.clone() {
                        div {
                            class: "bg-neutral-950 rounded p-3",
                            p { class: "text-neutral-300 text-sm", "{reply.content}" }
                            p {
                                class: "text-neutral-500 text-xs mt-1",
                                "{reply.author_name} · {reply.author_role}"
                            }
                        }
                    }
                    form {
                        onsubmit: handle_reply,
                        class: "flex gap-2",
                        Input {
                            class: "flex-1",
                            placeholder: "Write a reply...",
                            value: reply_text(),
                            oninput: move |evt: FormEvent| reply_text.set(evt.value()),
                        }
                        Button { r#type: "submit", "Reply" }
                    }
                }
            }
        }
    }
}
