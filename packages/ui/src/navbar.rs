//! Top navigation bar, link set depends on the signed-in role.

use client::Role;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaShieldHalved;
use dioxus_free_icons::Icon;

use crate::auth::use_auth;
use crate::components::{Button, ButtonVariant};

const STUDENT_LINKS: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/notes", "Notes"),
    ("/forum", "Forum"),
    ("/announcements", "Announcements"),
];

const ADMIN_LINKS: &[(&str, &str)] = &[
    ("/admin", "Dashboard"),
    ("/quiz", "Quizzes"),
    ("/notes", "Notes"),
    ("/forum", "Forum"),
    ("/announcements", "Announcements"),
];

#[component]
pub fn Navigation(
    active: String,
    on_navigate: EventHandler<String>,
    on_logout: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let state = auth();
    let Some(profile) = state.profile else {
        return rsx! {};
    };
    let links = match profile.role {
        Role::Admin => ADMIN_LINKS,
        Role::Student => STUDENT_LINKS,
    };

    rsx! {
        nav {
            class: "flex items-center justify-between px-6 py-3 bg-neutral-900 border-b border-neutral-800",
            div {
                class: "flex items-center gap-6",
                span {
                    class: "flex items-center gap-2 text-emerald-500 font-bold text-lg",
                    Icon { width: 20, height: 20, fill: "currentColor", icon: FaShieldHalved }
                    "CyberSec Academy"
                }
                for (path, label) in links.iter().copied() {
                    button {
                        class: if active == path {
                            "text-sm text-emerald-400 font-medium"
                        } else {
                            "text-sm text-neutral-400 hover:text-neutral-100"
                        },
                        onclick: move |_| on_navigate.call(path.to_string()),
                        "{label}"
                    }
                }
            }
            div {
                class: "flex items-center gap-4",
                span {
                    class: "text-sm text-neutral-400",
                    "Welcome, {profile.name}"
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_logout.call(()),
                    "Logout"
                }
            }
        }
    }
}
