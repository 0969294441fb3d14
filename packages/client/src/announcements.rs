//! Typed operations on announcements.
//!
//! Listing goes through the `get_announcements_with_authors` remote procedure
//! so the author's display name and role arrive joined onto each row. Unknown
//! severity strings and missing authors degrade to `Info` / "Unknown" rather
//! than failing the fetch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::error::ClientError;
use crate::models::{wire_timestamp, Announcement, AnnouncementKind, Role};
use crate::query::Query;
use crate::transport::Transport;

#[derive(Debug, Deserialize)]
struct AnnouncementRow {
    id: String,
    title: String,
    content: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    author_name: Option<String>,
    author_role: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AnnouncementsApi {
    transport: Arc<dyn Transport>,
}

impl AnnouncementsApi {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch all announcements, newest first.
    pub async fn list(&self) -> Result<Vec<Announcement>, ClientError> {
        let raw = self
            .transport
            .rpc("get_announcements_with_authors", json!({}))
            .await?;
        let rows: Vec<AnnouncementRow> = serde_json::from_value(raw)?;
        Ok(rows
            .into_iter()
            .map(|row| Announcement {
                id: row.id,
                title: row.title,
                content: row.content,
                kind: AnnouncementKind::from_wire(row.kind.as_deref()),
                author_name: row.author_name.unwrap_or_else(|| "Unknown".to_string()),
                author_role: Role::from_wire(row.author_role.as_deref()),
                created_at: row.created_at,
            })
            .collect())
    }

    pub async fn create(
        &self,
        title: &str,
        content: &str,
        kind: AnnouncementKind,
        author_id: &str,
    ) -> Result<(), ClientError> {
        let now = wire_timestamp();
        self.transport
            .insert(
                "announcements",
                json!({
                    "title": title,
                    "content": content,
                    "type": kind.as_str(),
                    "author_id": author_id,
                    "created_at": now,
                    "updated_at": now,
                }),
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.transport
            .delete("announcements", &Query::new().eq("id", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTransport;
    use crate::Client;

    fn client() -> (Client, MemoryTransport) {
        let transport = MemoryTransport::new();
        let client = Client::new(transport.clone(), Default::default());
        (client, transport)
    }

    #[tokio::test]
    async fn list_is_newest_first_with_author_join() {
        let (client, transport) = client();
        transport.seed(
            "profiles",
            json!({"id": "u-admin", "name": "Dana", "role": "admin"}),
        );

        client
            .announcements()
            .create("Lab closed", "Maintenance", AnnouncementKind::Warning, "u-admin")
            .await
            .unwrap();
        client
            .announcements()
            .create("New module", "Week 4 is up", AnnouncementKind::Info, "u-admin")
            .await
            .unwrap();

        let list = client.announcements().list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "New module");
        assert_eq!(list[0].kind, AnnouncementKind::Info);
        assert_eq!(list[0].author_name, "Dana");
        assert_eq!(list[0].author_role, Role::Admin);
        assert_eq!(list[1].title, "Lab closed");
        assert_eq!(list[1].kind, AnnouncementKind::Warning);
    }

    #[tokio::test]
    async fn unknown_kind_and_missing_author_degrade() {
        let (client, transport) = client();
        transport.seed(
            "announcements",
            json!({"title": "t", "content": "c", "type": "celebration",
                   "author_id": "ghost", "created_at": "2024-01-01T00:00:00.000000Z"}),
        );

        let list = client.announcements().list().await.unwrap();
        assert_eq!(list[0].kind, AnnouncementKind::Info);
        assert_eq!(list[0].author_name, "Unknown");
        assert_eq!(list[0].author_role, Role::Student);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let (client, transport) = client();
        client
            .announcements()
            .create("t", "c", AnnouncementKind::Urgent, "u-admin")
            .await
            .unwrap();
        let id = transport.rows("announcements")[0]["id"]
            .as_str()
            .unwrap()
            .to_string();

        client.announcements().delete(&id).await.unwrap();
        assert!(client.announcements().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_changes_nothing() {
        let (client, transport) = client();
        client
            .announcements()
            .create("t", "c", AnnouncementKind::Info, "u-admin")
            .await
            .unwrap();
        let before = client.announcements().list().await.unwrap();
        let id = before[0].id.clone();

        transport.fail_on("delete:announcements");
        client.announcements().delete(&id).await.unwrap_err();

        transport.clear_failures();
        assert_eq!(client.announcements().list().await.unwrap(), before);
    }
}
