use client::{AcademyConfig, Client, Role};
use dioxus::prelude::*;

use ui::{use_auth, AuthProvider, ToastHost};
use views::{
    AdminDashboard, Announcements, Dashboard, Forum, Login, Notes, QuizBuilder, Register, TakeQuiz,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/admin")]
    AdminDashboard {},
    #[route("/notes")]
    Notes {},
    #[route("/forum")]
    Forum {},
    #[route("/announcements")]
    Announcements {},
    #[route("/quiz")]
    QuizBuilder {},
    #[route("/quiz/take")]
    TakeQuiz {},
}

const FAVICON: Asset = asset!("/assets/favicon.ico");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // One backend client for the whole app, shared through context.
    use_context_provider(|| Signal::new(Client::from_config(AcademyConfig::default())));

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            ToastHost {
                Router::<Route> {}
            }
        }
    }
}

/// Redirect `/` by auth state: login page when signed out, the role's
/// dashboard when signed in.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let state = auth();
    if state.loading {
        return rsx! {
            div { class: "p-8 text-neutral-400", "Loading..." }
        };
    }
    match state.profile {
        Some(profile) if profile.role == Role::Admin => {
            nav.replace(Route::AdminDashboard {});
        }
        Some(_) => {
            nav.replace(Route::Dashboard {});
        }
        None => {
            nav.replace(Route::Login {});
        }
    }
    rsx! {}
}
