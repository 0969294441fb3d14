//! Authentication context and session flows for the UI.

use client::{Client, ClientError, Profile, Registration, Session};
use dioxus::prelude::*;

use crate::toast::Toasts;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub profile: Option<Profile>,
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            profile: None,
            session: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Get the shared backend client.
pub fn use_client() -> Signal<Client> {
    use_context::<Signal<Client>>()
}

/// Provider component that resolves the session and profile on mount.
/// Wrap the app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_client();
    let mut auth_state = use_signal(AuthState::default);

    let _ = use_resource(move || async move {
        let client = client();
        let session = match client.auth().current_session().await {
            Ok(session) => session,
            Err(err) => {
                tracing::error!("failed to read session: {err}");
                None
            }
        };
        let profile = match &session {
            Some(session) => client
                .auth()
                .fetch_profile(&session.user_id)
                .await
                .unwrap_or_default(),
            None => None,
        };
        auth_state.set(AuthState {
            profile,
            session,
            loading: false,
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Sign in and populate the auth state. Returns whether it succeeded.
pub async fn login(
    mut auth: Signal<AuthState>,
    client: Client,
    mut toasts: Toasts,
    email: String,
    password: String,
) -> bool {
    match client.auth().sign_in(&email, &password).await {
        Ok(profile) => {
            let session = client.auth().current_session().await.unwrap_or(None);
            toasts.success(format!("Welcome back, {}!", profile.name));
            auth.set(AuthState {
                profile: Some(profile),
                session,
                loading: false,
            });
            true
        }
        Err(ClientError::MissingProfile(_)) => {
            toasts.error("Your account has no profile yet. Contact an administrator.");
            false
        }
        Err(err) => {
            tracing::error!("login failed: {err}");
            toasts.error("Invalid email or password.");
            false
        }
    }
}

/// Register a new student account. Returns whether the account was created.
pub async fn register(
    client: Client,
    mut toasts: Toasts,
    email: String,
    password: String,
    name: String,
) -> bool {
    match client.auth().register(&email, &password, &name).await {
        Ok(Registration::Confirmed) => {
            toasts.success("Account created! Please log in.");
            true
        }
        Ok(Registration::ProfilePending) => {
            // The auth identity exists even though the profile row is missing.
            toasts.success("Account created. If login fails, try again shortly.");
            true
        }
        Err(err) => {
            tracing::error!("registration failed: {err}");
            toasts.error("Registration failed. Check your details and try again.");
            false
        }
    }
}

/// Sign out and clear the auth state.
pub async fn logout(mut auth: Signal<AuthState>, client: Client, mut toasts: Toasts) {
    if let Err(err) = client.auth().sign_out().await {
        tracing::error!("logout failed: {err}");
    }
    auth.set(AuthState {
        profile: None,
        session: None,
        loading: false,
    });
    toasts.success("Signed out.");
}
