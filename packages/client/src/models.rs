//! # Domain models for the academy backend
//!
//! Defines the typed rows the client exchanges with the hosted backend. These
//! types are `Serialize + Deserialize + PartialEq` so they can cross async
//! boundaries and be asserted on directly in tests.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Profile`] | A row from the `profiles` relation: identity, display name, and [`Role`]. Created once at registration; the role never changes afterwards. |
//! | [`Session`] | The transient auth session returned by the auth endpoints. Not authoritative; the backend owns session state. |
//! | [`Note`] | A course note: metadata plus a storage path (`file_url`) and a download counter maintained by client-side read-modify-write. |
//! | [`Announcement`] | An announcement joined with its author's display info, as returned by the `get_announcements_with_authors` remote procedure. |
//! | [`ForumPost`] / [`ForumReply`] | A forum topic with its derived reply list; replies are fetched separately per topic. |
//!
//! The wire fallbacks (`author_name` → `"Unknown"`, unknown roles → `student`,
//! unknown announcement kinds → `info`) live on [`Role::from_wire`] and
//! [`AnnouncementKind::from_wire`] and are applied when mapping raw remote
//! procedure rows into these models.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Role carried by every profile. Unknown wire values degrade to `Student`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Student,
}

impl Role {
    /// Map a raw wire value to a role, defaulting to `Student`.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("admin") => Role::Admin,
            _ => Role::Student,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user profile row from the `profiles` relation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An authenticated session as reported by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
}

/// A course note row from the `notes` relation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub file_name: String,
    pub file_type: String,
    pub file_url: Option<String>,
    pub upload_date: DateTime<Utc>,
    #[serde(default)]
    pub download_count: i64,
}

/// Announcement severity. Unknown wire values degrade to `Info`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    #[default]
    Info,
    Warning,
    Urgent,
}

impl AnnouncementKind {
    /// Map a raw wire value to a kind, defaulting to `Info`.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("warning") => AnnouncementKind::Warning,
            Some("urgent") => AnnouncementKind::Urgent,
            _ => AnnouncementKind::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementKind::Info => "info",
            AnnouncementKind::Warning => "warning",
            AnnouncementKind::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for AnnouncementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An announcement joined with its author's display info.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: AnnouncementKind,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_role: Role,
}

/// A reply to a forum topic, joined with author display info.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForumReply {
    pub id: String,
    pub content: String,
    pub author_name: String,
    pub author_role: Role,
    pub created_at: DateTime<Utc>,
}

/// A forum topic with its derived reply list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub author_role: Role,
    pub created_at: DateTime<Utc>,
    pub reply_count: i64,
    pub replies: Vec<ForumReply>,
}

/// Current time as a fixed-width RFC 3339 string for table rows.
///
/// Microsecond precision keeps the strings the same length, so the backend's
/// lexicographic ordering matches chronological ordering.
pub fn wire_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
