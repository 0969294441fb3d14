//! # Client crate — typed data access for the CyberSec Academy frontends
//!
//! Everything the UI does against the hosted backend goes through this crate:
//! auth, profile resolution, the notes library (rows plus blob storage), the
//! discussion forum, and announcements. The crate is transport-agnostic: a
//! [`Client`] wraps an [`Arc<dyn Transport>`], and the two implementations are
//! [`HttpTransport`] (the real backend) and [`MemoryTransport`] (an in-memory
//! double for tests, with per-operation failure injection).
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`announcements`] | Announcement listing (author-joined RPC), create, delete |
//! | [`auth`] | Sign-in/sign-up/sign-out, profile resolution, the non-transactional registration flow |
//! | [`config`] | TOML-backed backend URL / anon key / storage bucket configuration |
//! | [`error`] | [`ClientError`] and conversions from transport-level failures |
//! | [`forum`] | Topic + reply listing (per-topic reply fan-out), topic and reply creation |
//! | [`http`] | [`HttpTransport`] speaking the backend's REST/RPC/storage/auth conventions |
//! | [`memory`] | [`MemoryTransport`] test double |
//! | [`models`] | Wire models: profiles, sessions, notes, topics, replies, announcements |
//! | [`notes`] | Notes library: upload-then-insert create, download with counter, delete |
//! | [`query`] | Small filter/order/limit builder shared by every table operation |
//! | [`transport`] | The [`Transport`] trait both backends implement |

use std::sync::Arc;

pub mod announcements;
pub mod auth;
pub mod config;
pub mod error;
pub mod forum;
pub mod http;
pub mod memory;
pub mod models;
pub mod notes;
pub mod query;
pub mod transport;

pub use announcements::AnnouncementsApi;
pub use auth::{AuthApi, Registration};
pub use config::AcademyConfig;
pub use error::ClientError;
pub use forum::ForumApi;
pub use http::HttpTransport;
pub use memory::MemoryTransport;
pub use models::{
    Announcement, AnnouncementKind, ForumPost, ForumReply, Note, Profile, Role, Session,
};
pub use notes::{DownloadedFile, FileUpload, NotesApi};
pub use query::Query;
pub use transport::{SignUpOptions, Transport};

/// Handle to the backend, cheap to clone.
///
/// Construct one with [`Client::from_config`] for the real backend or
/// [`Client::new`] with a [`MemoryTransport`] in tests, then grab the typed
/// API you need: [`Client::auth`], [`Client::notes`], [`Client::forum`],
/// [`Client::announcements`].
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    config: Arc<AcademyConfig>,
}

impl Client {
    pub fn new(transport: impl Transport + 'static, config: AcademyConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
        }
    }

    pub fn from_config(config: AcademyConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self::new(transport, config)
    }

    pub fn config(&self) -> &AcademyConfig {
        &self.config
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.transport.clone())
    }

    pub fn notes(&self) -> NotesApi {
        NotesApi::new(self.transport.clone(), self.config.storage.bucket.clone())
    }

    pub fn forum(&self) -> ForumApi {
        ForumApi::new(self.transport.clone())
    }

    pub fn announcements(&self) -> AnnouncementsApi {
        AnnouncementsApi::new(self.transport.clone())
    }
}
