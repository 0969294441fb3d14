//! Registration page view with email/password form.

use dioxus::prelude::*;
use ui::components::{Button, Input};
use ui::{use_auth, use_client, use_toasts};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let client = use_client();
    let toasts = use_toasts();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, the dashboard redirect on `/` takes over
    let state = auth();
    if !state.loading && state.profile.is_some() {
        nav.replace(Route::Root {});
        return rsx! {};
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let p = password();
            let cp = confirm_password();

            if n.is_empty() {
                error.set(Some("Name is required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.len() < 8 {
                error.set(Some("Password must be at least 8 characters".to_string()));
                return;
            }
            if p != cp {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            loading.set(true);
            if ui::register(client(), toasts, e, p, n).await {
                nav.push(Route::Login {});
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen p-8 bg-neutral-950",

            h1 {
                class: "mb-2 text-emerald-500 font-bold text-[1.75rem]",
                "Create Account"
            }

            p {
                class: "mb-8 text-neutral-400 text-[0.9375rem]",
                "Join CyberSec Academy as a student"
            }

            form {
                onsubmit: handle_register,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                if let Some(err) = error() {
                    div {
                        class: "px-2.5 py-2.5 bg-red-950 border border-red-800 rounded text-red-400 text-[0.8125rem]",
                        "{err}"
                    }
                }

                Input {
                    class: "w-full",
                    r#type: "text",
                    placeholder: "Name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }

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
                    placeholder: "Password (min 8 characters)",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Input {
                    class: "w-full",
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                Button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Register" }
                }
            }

            p {
                class: "mt-6 text-neutral-500 text-sm",
                "Already have an account? "
                Link {
                    class: "text-emerald-500 hover:underline",
                    to: Route::Login {},
                    "Sign in"
                }
            }
        }
    }
}
