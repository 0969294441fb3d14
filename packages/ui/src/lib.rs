//! This crate contains all shared UI for the workspace: the auth context,
//! toast notifications, the role-aware navigation bar, the data hooks the
//! views drive, and the quiz engine.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{login, logout, register, use_auth, use_client, AuthProvider, AuthState};

mod toast;
pub use toast::{use_toasts, ToastHost, ToastKind, Toasts};

mod navbar;
pub use navbar::Navigation;

mod notes;
pub use notes::{use_notes, UseNotes};

mod forum;
pub use forum::{use_forum, UseForum};

mod announcements;
pub use announcements::{use_announcements, UseAnnouncements};

pub mod quiz;
pub use quiz::{
    DraftQuestion, Question, QuestionKind, Quiz, QuizAttempt, QuizDraft, QuizError, ScoreReport,
    QUIZ_TIME_LIMIT_SECS,
};
