//! Typed operations on the `notes` relation and its stored files.
//!
//! `create` is two sequential remote calls: upload the file to object
//! storage, then insert the metadata row. There is no compensating delete if
//! the insert fails after the upload succeeded, so an orphaned object can
//! result (logged, accepted). `download` fetches the blob and then bumps the
//! download counter with a client-side read-modify-write; two concurrent
//! downloads can both read the same value and lose an update. The backend
//! offers no atomic increment to this client, and the counter is advisory.

use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ClientError;
use crate::models::{wire_timestamp, Note};
use crate::query::Query;
use crate::transport::Transport;

/// A file picked by the user for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A downloaded note file, ready to hand to the browser.
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct NotesApi {
    transport: Arc<dyn Transport>,
    bucket: String,
}

impl NotesApi {
    pub(crate) fn new(transport: Arc<dyn Transport>, bucket: String) -> Self {
        Self { transport, bucket }
    }

    /// Fetch the whole collection, newest upload first.
    pub async fn list(&self) -> Result<Vec<Note>, ClientError> {
        let rows = self
            .transport
            .select("notes", &Query::new().order_desc("upload_date"))
            .await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(Into::into))
            .collect()
    }

    /// Upload the file, then insert the metadata row.
    pub async fn create(
        &self,
        title: &str,
        description: &str,
        file: FileUpload,
        author_id: &str,
    ) -> Result<(), ClientError> {
        let ext = file.name.rsplit('.').next().unwrap_or("");
        let path = format!("notes/{}.{ext}", Uuid::new_v4());

        self.transport.upload(&self.bucket, &path, file.bytes).await?;

        let row = json!({
            "title": title,
            "description": description,
            "file_name": file.name,
            "file_type": if ext.is_empty() { "UNKNOWN".to_string() } else { ext.to_uppercase() },
            "file_url": path,
            "upload_date": wire_timestamp(),
            "download_count": 0,
            "author_id": author_id,
        });
        if let Err(err) = self.transport.insert("notes", row).await {
            // The uploaded object is orphaned here; nothing cleans it up.
            tracing::warn!("note insert failed after uploading {path}: {err}");
            return Err(err);
        }
        Ok(())
    }

    /// Download the stored file and bump the counter. Counter failures are
    /// logged but never surfaced: the user already has the file.
    pub async fn download(&self, note: &Note) -> Result<DownloadedFile, ClientError> {
        let Some(path) = note.file_url.as_deref() else {
            return Err(ClientError::FileUnavailable);
        };
        let bytes = self.transport.download(&self.bucket, path).await?;

        if let Err(err) = self.increment_download_count(&note.id).await {
            tracing::error!("failed to update download count for {}: {err}", note.id);
        }

        Ok(DownloadedFile {
            name: note.file_name.clone(),
            bytes,
        })
    }

    /// Read-modify-write increment of the download counter. Not atomic:
    /// concurrent invocations can lose an update.
    pub async fn increment_download_count(&self, note_id: &str) -> Result<(), ClientError> {
        let rows = self
            .transport
            .select("notes", &Query::new().eq("id", note_id).limit(1))
            .await?;
        let current = rows
            .first()
            .and_then(|row| row.get("download_count"))
            .and_then(Value::as_i64)
            .unwrap_or(0);
        self.transport
            .update(
                "notes",
                json!({ "download_count": current + 1 }),
                &Query::new().eq("id", note_id),
            )
            .await
    }

    /// Remove the stored file (best effort), then delete the row.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let rows = self
            .transport
            .select("notes", &Query::new().eq("id", id).limit(1))
            .await?;
        if let Some(path) = rows
            .first()
            .and_then(|row| row.get("file_url"))
            .and_then(Value::as_str)
        {
            if let Err(err) = self.transport.remove(&self.bucket, path).await {
                tracing::error!("failed to delete stored file {path}: {err}");
            }
        }
        self.transport
            .delete("notes", &Query::new().eq("id", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTransport;
    use crate::transport::SignUpOptions;
    use crate::models::Session;
    use crate::Client;
    use async_trait::async_trait;

    const BUCKET: &str = "course-files";

    fn client() -> (Client, MemoryTransport) {
        let transport = MemoryTransport::new();
        let client = Client::new(transport.clone(), Default::default());
        (client, transport)
    }

    fn pdf(name: &str) -> FileUpload {
        FileUpload {
            name: name.to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[tokio::test]
    async fn create_uploads_then_inserts() {
        let (client, transport) = client();
        client
            .notes()
            .create("Firewalls", "Lecture 3", pdf("firewalls.pdf"), "u-1")
            .await
            .unwrap();

        assert_eq!(transport.object_count(), 1);
        let notes = client.notes().list().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Firewalls");
        assert_eq!(notes[0].file_type, "PDF");
        assert_eq!(notes[0].download_count, 0);
        assert!(notes[0].file_url.as_deref().unwrap().starts_with("notes/"));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let (client, transport) = client();
        transport.seed(
            "notes",
            serde_json::json!({
                "title": "old", "file_name": "a.pdf", "file_type": "PDF",
                "file_url": "notes/a.pdf", "download_count": 0,
                "upload_date": "2024-01-01T00:00:00.000000Z",
            }),
        );
        transport.seed(
            "notes",
            serde_json::json!({
                "title": "new", "file_name": "b.pdf", "file_type": "PDF",
                "file_url": "notes/b.pdf", "download_count": 0,
                "upload_date": "2024-06-01T00:00:00.000000Z",
            }),
        );

        let notes = client.notes().list().await.unwrap();
        assert_eq!(notes[0].title, "new");
        assert_eq!(notes[1].title, "old");
    }

    #[tokio::test]
    async fn failed_insert_leaves_collection_unchanged_and_orphans_the_blob() {
        let (client, transport) = client();
        transport.fail_on("insert:notes");

        let err = client
            .notes()
            .create("Firewalls", "", pdf("firewalls.pdf"), "u-1")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Backend { .. }));

        // Collection unchanged, but the blob was already uploaded.
        assert!(client.notes().list().await.unwrap().is_empty());
        assert_eq!(transport.object_count(), 1);
    }

    #[tokio::test]
    async fn failed_upload_inserts_nothing() {
        let (client, transport) = client();
        transport.fail_on("storage:upload");

        client
            .notes()
            .create("Firewalls", "", pdf("firewalls.pdf"), "u-1")
            .await
            .unwrap_err();
        assert_eq!(transport.object_count(), 0);
        assert!(transport.rows("notes").is_empty());
    }

    #[tokio::test]
    async fn download_returns_bytes_and_increments_counter() {
        let (client, _transport) = client();
        client
            .notes()
            .create("Firewalls", "", pdf("firewalls.pdf"), "u-1")
            .await
            .unwrap();
        let note = client.notes().list().await.unwrap().remove(0);

        let file = client.notes().download(&note).await.unwrap();
        assert_eq!(file.name, "firewalls.pdf");
        assert_eq!(file.bytes, b"%PDF-1.4");

        let refreshed = client.notes().list().await.unwrap().remove(0);
        assert_eq!(refreshed.download_count, 1);
    }

    #[tokio::test]
    async fn download_without_file_is_an_error() {
        let (client, transport) = client();
        transport.seed(
            "notes",
            serde_json::json!({
                "title": "ghost", "file_name": "ghost.pdf", "file_type": "PDF",
                "file_url": null, "download_count": 0,
                "upload_date": "2024-01-01T00:00:00.000000Z",
            }),
        );
        let note = client.notes().list().await.unwrap().remove(0);
        let err = client.notes().download(&note).await.unwrap_err();
        assert!(matches!(err, ClientError::FileUnavailable));
    }

    #[tokio::test]
    async fn counter_failure_does_not_fail_the_download() {
        let (client, transport) = client();
        client
            .notes()
            .create("Firewalls", "", pdf("firewalls.pdf"), "u-1")
            .await
            .unwrap();
        let note = client.notes().list().await.unwrap().remove(0);

        transport.fail_on("update:notes");
        let file = client.notes().download(&note).await.unwrap();
        assert_eq!(file.bytes, b"%PDF-1.4");

        transport.clear_failures();
        let refreshed = client.notes().list().await.unwrap().remove(0);
        assert_eq!(refreshed.download_count, 0);
    }

    #[tokio::test]
    async fn delete_removes_row_and_stored_file() {
        let (client, transport) = client();
        client
            .notes()
            .create("Firewalls", "", pdf("firewalls.pdf"), "u-1")
            .await
            .unwrap();
        let note = client.notes().list().await.unwrap().remove(0);

        client.notes().delete(&note.id).await.unwrap();
        assert!(client.notes().list().await.unwrap().is_empty());
        assert_eq!(transport.object_count(), 0);
    }

    #[tokio::test]
    async fn failed_delete_leaves_collection_unchanged() {
        let (client, transport) = client();
        client
            .notes()
            .create("Firewalls", "", pdf("firewalls.pdf"), "u-1")
            .await
            .unwrap();
        let before = client.notes().list().await.unwrap();

        transport.fail_on("delete:notes");
        let note_id = before[0].id.clone();
        client.notes().delete(&note_id).await.unwrap_err();

        transport.clear_failures();
        assert_eq!(client.notes().list().await.unwrap(), before);
    }

    /// Transport wrapper that parks both readers at a barrier after the
    /// `notes` select, forcing the read phases of two read-modify-write
    /// increments to complete before either write runs.
    struct RacingTransport {
        inner: MemoryTransport,
        barrier: std::sync::Arc<tokio::sync::Barrier>,
    }

    #[async_trait(?Send)]
    impl Transport for RacingTransport {
        async fn select(
            &self,
            table: &str,
            query: &Query,
        ) -> Result<Vec<serde_json::Value>, ClientError> {
            let rows = self.inner.select(table, query).await?;
            if table == "notes" {
                self.barrier.wait().await;
            }
            Ok(rows)
        }

        async fn insert(&self, table: &str, row: serde_json::Value) -> Result<(), ClientError> {
            self.inner.insert(table, row).await
        }

        async fn update(
            &self,
            table: &str,
            patch: serde_json::Value,
            query: &Query,
        ) -> Result<(), ClientError> {
            self.inner.update(table, patch, query).await
        }

        async fn delete(&self, table: &str, query: &Query) -> Result<(), ClientError> {
            self.inner.delete(table, query).await
        }

        async fn rpc(
            &self,
            function: &str,
            params: serde_json::Value,
        ) -> Result<serde_json::Value, ClientError> {
            self.inner.rpc(function, params).await
        }

        async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), ClientError> {
            self.inner.upload(bucket, path, bytes).await
        }

        async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, ClientError> {
            self.inner.download(bucket, path).await
        }

        async fn remove(&self, bucket: &str, path: &str) -> Result<(), ClientError> {
            self.inner.remove(bucket, path).await
        }

        async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError> {
            self.inner.sign_in(email, password).await
        }

        async fn sign_up(
            &self,
            email: &str,
            password: &str,
            options: &SignUpOptions,
        ) -> Result<Session, ClientError> {
            self.inner.sign_up(email, password, options).await
        }

        async fn sign_out(&self) -> Result<(), ClientError> {
            self.inner.sign_out().await
        }

        async fn current_session(&self) -> Result<Option<Session>, ClientError> {
            self.inner.current_session().await
        }
    }

    #[tokio::test]
    async fn concurrent_increments_lose_an_update() {
        let memory = MemoryTransport::new();
        let id = memory.seed(
            "notes",
            serde_json::json!({
                "title": "raced", "file_name": "r.pdf", "file_type": "PDF",
                "file_url": "notes/r.pdf", "download_count": 0,
                "upload_date": "2024-01-01T00:00:00.000000Z",
            }),
        );

        let racing = RacingTransport {
            inner: memory.clone(),
            barrier: std::sync::Arc::new(tokio::sync::Barrier::new(2)),
        };
        let client = Client::new(racing, Default::default());
        let notes = client.notes();

        // Both increments read download_count = 0 before either writes.
        let (a, b) = futures::join!(
            notes.increment_download_count(&id),
            notes.increment_download_count(&id),
        );
        a.unwrap();
        b.unwrap();

        let rows = memory.rows("notes");
        assert_eq!(rows[0]["download_count"], serde_json::json!(1));
    }

    #[tokio::test]
    async fn sequential_increments_do_not_lose_updates() {
        let (client, transport) = client();
        let id = transport.seed(
            "notes",
            serde_json::json!({
                "title": "n", "file_name": "n.pdf", "file_type": "PDF",
                "file_url": "notes/n.pdf", "download_count": 0,
                "upload_date": "2024-01-01T00:00:00.000000Z",
            }),
        );
        client.notes().increment_download_count(&id).await.unwrap();
        client.notes().increment_download_count(&id).await.unwrap();
        assert_eq!(transport.rows("notes")[0]["download_count"], serde_json::json!(2));
    }

    #[tokio::test]
    async fn uploaded_objects_land_in_the_course_bucket() {
        let (client, transport) = client();
        client
            .notes()
            .create("Firewalls", "", pdf("firewalls.pdf"), "u-1")
            .await
            .unwrap();
        let note = client.notes().list().await.unwrap().remove(0);
        let path = note.file_url.unwrap();
        assert!(transport.has_object(BUCKET, &path));
    }
}
