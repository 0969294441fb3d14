//! Typed operations on forum topics and replies.
//!
//! The topic list comes from the `get_forum_posts_with_authors` remote
//! procedure; each topic's replies come from one further
//! `get_forum_replies_with_authors` call. The fan-out is concurrent across
//! topics (`join_all`) but not batched at the data store, so listing N topics
//! costs N + 1 remote calls. A failed reply fetch degrades that topic to an
//! empty reply list instead of failing the whole listing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future;
use serde::Deserialize;
use serde_json::json;

use crate::error::ClientError;
use crate::models::{wire_timestamp, ForumPost, ForumReply, Role};
use crate::transport::Transport;

#[derive(Debug, Deserialize)]
struct TopicRow {
    id: String,
    title: String,
    content: String,
    author_name: Option<String>,
    author_role: Option<String>,
    created_at: DateTime<Utc>,
    reply_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ReplyRow {
    id: String,
    content: String,
    author_name: Option<String>,
    author_role: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ForumApi {
    transport: Arc<dyn Transport>,
}

impl ForumApi {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch all topics with their replies, newest topic first.
    pub async fn list(&self) -> Result<Vec<ForumPost>, ClientError> {
        let raw = self
            .transport
            .rpc("get_forum_posts_with_authors", json!({}))
            .await?;
        let topics: Vec<TopicRow> = serde_json::from_value(raw)?;
        Ok(future::join_all(topics.into_iter().map(|t| self.load_topic(t))).await)
    }

    async fn load_topic(&self, topic: TopicRow) -> ForumPost {
        let replies = match self.fetch_replies(&topic.id).await {
            Ok(replies) => replies,
            Err(err) => {
                tracing::error!("failed to fetch replies for topic {}: {err}", topic.id);
                Vec::new()
            }
        };
        ForumPost {
            id: topic.id,
            title: topic.title,
            content: topic.content,
            author_name: topic.author_name.unwrap_or_else(|| "Unknown".to_string()),
            author_role: Role::from_wire(topic.author_role.as_deref()),
            created_at: topic.created_at,
            reply_count: topic.reply_count.unwrap_or(0),
            replies,
        }
    }

    async fn fetch_replies(&self, topic_id: &str) -> Result<Vec<ForumReply>, ClientError> {
        let raw = self
            .transport
            .rpc(
                "get_forum_replies_with_authors",
                json!({ "topic_id_param": topic_id }),
            )
            .await?;
        let rows: Vec<ReplyRow> = serde_json::from_value(raw)?;
        Ok(rows
            .into_iter()
            .map(|row| ForumReply {
                id: row.id,
                content: row.content,
                author_name: row.author_name.unwrap_or_else(|| "Unknown".to_string()),
                author_role: Role::from_wire(row.author_role.as_deref()),
                created_at: row.created_at,
            })
            .collect())
    }

    /// Start a new topic.
    pub async fn create_topic(
        &self,
        title: &str,
        content: &str,
        author_id: &str,
    ) -> Result<(), ClientError> {
        self.transport
            .insert(
                "topics",
                json!({
                    "title": title,
                    "content": content,
                    "author_id": author_id,
                    "created_at": wire_timestamp(),
                }),
            )
            .await
    }

    /// Reply to an existing topic.
    pub async fn create_reply(
        &self,
        topic_id: &str,
        content: &str,
        author_id: &str,
    ) -> Result<(), ClientError> {
        self.transport
            .insert(
                "posts",
                json!({
                    "content": content,
                    "topic_id": topic_id,
                    "author_id": author_id,
                    "created_at": wire_timestamp(),
                }),
            )
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

    fn seed_profiles(transport: &MemoryTransport) {
        transport.seed(
            "profiles",
            json!({"id": "u-admin", "name": "Dana", "role": "admin"}),
        );
        transport.seed(
            "profiles",
            json!({"id": "u-student", "name": "Sam", "role": "student"}),
        );
    }

    #[tokio::test]
    async fn list_nests_replies_under_topics() {
        let (client, transport) = client();
        seed_profiles(&transport);

        client
            .forum()
            .create_topic("Is WPA2 still safe?", "Asking for a friend", "u-student")
            .await
            .unwrap();
        let topic_id = transport.rows("topics")[0]["id"]
            .as_str()
            .unwrap()
            .to_string();
        client
            .forum()
            .create_reply(&topic_id, "Prefer WPA3 where you can", "u-admin")
            .await
            .unwrap();

        let posts = client.forum().list().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author_name, "Sam");
        assert_eq!(posts[0].author_role, Role::Student);
        assert_eq!(posts[0].reply_count, 1);
        assert_eq!(posts[0].replies.len(), 1);
        assert_eq!(posts[0].replies[0].author_name, "Dana");
        assert_eq!(posts[0].replies[0].author_role, Role::Admin);
    }

    #[tokio::test]
    async fn list_after_create_matches_a_fresh_fetch() {
        let (client, transport) = client();
        seed_profiles(&transport);

        client
            .forum()
            .create_topic("First", "one", "u-student")
            .await
            .unwrap();
        let after_create = client.forum().list().await.unwrap();
        let fresh = client.forum().list().await.unwrap();
        assert_eq!(after_create, fresh);
        assert_eq!(fresh.len(), 1);
    }

    #[tokio::test]
    async fn failed_topic_insert_changes_nothing() {
        let (client, transport) = client();
        seed_profiles(&transport);
        client
            .forum()
            .create_topic("Existing", "body", "u-student")
            .await
            .unwrap();
        let before = client.forum().list().await.unwrap();

        transport.fail_on("insert:topics");
        client
            .forum()
            .create_topic("Doomed", "body", "u-student")
            .await
            .unwrap_err();

        transport.clear_failures();
        assert_eq!(client.forum().list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn failed_reply_fetch_degrades_to_empty_replies() {
        let (client, transport) = client();
        seed_profiles(&transport);
        client
            .forum()
            .create_topic("Topic", "body", "u-student")
            .await
            .unwrap();
        let topic_id = transport.rows("topics")[0]["id"]
            .as_str()
            .unwrap()
            .to_string();
        client
            .forum()
            .create_reply(&topic_id, "hidden", "u-admin")
            .await
            .unwrap();

        transport.fail_on("rpc:get_forum_replies_with_authors");
        let posts = client.forum().list().await.unwrap();
        assert_eq!(posts.len(), 1);
        // The count still comes from the topic row; the reply list degrades.
        assert_eq!(posts[0].reply_count, 1);
        assert!(posts[0].replies.is_empty());
    }

    #[tokio::test]
    async fn missing_author_falls_back_to_unknown_student() {
        let (client, _transport) = client();
        client
            .forum()
            .create_topic("Orphan", "no profile row", "ghost")
            .await
            .unwrap();

        let posts = client.forum().list().await.unwrap();
        assert_eq!(posts[0].author_name, "Unknown");
        assert_eq!(posts[0].author_role, Role::Student);
    }

    #[tokio::test]
    async fn replies_are_oldest_first() {
        let (client, transport) = client();
        seed_profiles(&transport);
        let topic_id = transport.seed(
            "topics",
            json!({"title": "t", "content": "c", "author_id": "u-student",
                   "created_at": "2024-01-01T00:00:00.000000Z"}),
        );
        transport.seed(
            "posts",
            json!({"content": "second", "topic_id": topic_id, "author_id": "u-admin",
                   "created_at": "2024-01-02T00:00:00.000000Z"}),
        );
        transport.seed(
            "posts",
            json!({"content": "first", "topic_id": topic_id, "author_id": "u-student",
                   "created_at": "2024-01-01T12:00:00.000000Z"}),
        );

        let posts = client.forum().list().await.unwrap();
        let contents: Vec<&str> = posts[0].replies.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }
}
