use client::notes::DownloadedFile;
use dioxus::prelude::*;
use ui::{use_auth, use_client, use_toasts, Navigation};

use crate::Route;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::{AdminDashboard, Dashboard};

mod notes;
pub use notes::Notes;

mod forum;
pub use forum::Forum;

mod announcements;
pub use announcements::Announcements;

mod quiz_builder;
pub use quiz_builder::QuizBuilder;

mod take_quiz;
pub use take_quiz::TakeQuiz;

fn route_for(path: &str) -> Route {
    match path {
        "/dashboard" => Route::Dashboard {},
        "/admin" => Route::AdminDashboard {},
        "/quiz" => Route::QuizBuilder {},
        "/notes" => Route::Notes {},
        "/forum" => Route::Forum {},
        "/announcements" => Route::Announcements {},
        _ => Route::Root {},
    }
}

/// Chrome around every signed-in view: the navigation bar plus a redirect to
/// the login page when there is no session.
#[component]
pub fn Shell(active: String, children: Element) -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let client = use_client();
    let toasts = use_toasts();

    let state = auth();
    if state.loading {
        return rsx! {
            div { class: "p-8 text-neutral-400", "Loading..." }
        };
    }
    if state.profile.is_none() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        Navigation {
            active,
            on_navigate: move |path: String| {
                nav.push(route_for(&path));
            },
            on_logout: move |_| {
                spawn(async move {
                    ui::logout(auth, client(), toasts).await;
                    nav.push(Route::Login {});
                });
            },
        }
        main {
            class: "max-w-5xl mx-auto p-6",
            {children}
        }
    }
}

/// Hand a fetched file to the browser as a blob download.
#[cfg(target_arch = "wasm32")]
pub(crate) fn save_file(file: &DownloadedFile) {
    use wasm_bindgen::JsCast;

    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes.buffer());
    let Ok(blob) = web_sys::Blob::new_with_u8_array_sequence(&parts) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Ok(anchor) = document.create_element("a") {
            let _ = anchor.set_attribute("href", &url);
            let _ = anchor.set_attribute("download", &file.name);
            if let Some(anchor) = anchor.dyn_ref::<web_sys::HtmlElement>() {
                anchor.click();
            }
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn save_file(file: &DownloadedFile) {
    tracing::info!("downloaded {} ({} bytes)", file.name, file.bytes.len());
}
