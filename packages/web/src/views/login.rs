//! Login page view with email/password form.

use client::Role;
use dioxus::prelude::*;
use ui::components::{Button, Input};
use ui::{use_auth, use_client, use_toasts};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let client = use_client();
    let toasts = use_toasts();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);

    // If already logged in, go straight to the dashboard
    let state = auth();
    if !state.loading {
        if let Some(profile) = &state.profile {
            nav.replace(match profile.role {
                Role::Admin => Route::AdminDashboard {},
                Role::Student => Route::Dashboard {},
            });
            return rsx! {};
        }
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            loading.set(true);
            if ui::login(auth, client(), toasts, email(), password()).await {
                let role = auth()
                    .profile
                    .map(|p| p.role)
                    .unwrap_or(Role::Student);
                nav.push(match role {
                    Role::Admin => Route::AdminDashboard {},
                    Role::Student => Route::Dashboard {},
                });
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8 bg-neutral-950",

            h1 {
                class: "mb-2 text-emerald-500 font-bold text-[1.75rem]",
                "CyberSec Academy"
            }

            p {
                class: "mb-8 text-neutral-400 text-[0.9375rem]",
                "Sign in to continue"
            }

            form {
                onsubmit: handle_login,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                Input {
                    class: "w-full",
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                Input {
                    class: "w-full",
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "mt-6 text-neutral-500 text-sm",
                "No account yet? "
                Link {
                    class: "text-emerald-500 hover:underline",
                    to: Route::Register {},
                    "Register"
                }
            }
        }
    }
}
