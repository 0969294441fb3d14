//! Notes library state hook.
//!
//! Mutations follow the list's refresh discipline: a successful upload or
//! delete re-fetches the whole collection rather than patching it in place,
//! and a failed mutation leaves the collection exactly as it was.

use client::notes::{DownloadedFile, FileUpload};
use client::{Client, Note};
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::toast::{use_toasts, Toasts};

#[derive(Clone, Copy, PartialEq)]
pub struct UseNotes {
    client: Signal<Client>,
    toasts: Toasts,
    pub notes: Signal<Vec<Note>>,
    pub is_loading: Signal<bool>,
}

pub fn use_notes() -> UseNotes {
    let client = use_client();
    let toasts = use_toasts();
    let notes = use_signal(Vec::new);
    let is_loading = use_signal(|| true);
    let hook = UseNotes {
        client,
        toasts,
        notes,
        is_loading,
    };

    let _ = use_resource(move || async move {
        hook.refresh().await;
    });

    hook
}

impl UseNotes {
    fn client(&self) -> Client {
        (*self.client.peek()).clone()
    }

    pub async fn refresh(mut self) {
        match self.client().notes().list().await {
            Ok(list) => self.notes.set(list),
            Err(err) => {
                tracing::error!("failed to load notes: {err}");
                self.toasts.error("Failed to load notes.");
            }
        }
        self.is_loading.set(false);
    }

    /// Upload a file and create its note row. Returns whether it succeeded.
    pub async fn upload(
        mut self,
        title: &str,
        description: &str,
        file: FileUpload,
        author_id: &str,
    ) -> bool {
        match self
            .client()
            .notes()
            .create(title, description, file, author_id)
            .await
        {
            Ok(()) => {
                self.toasts.success("Note uploaded.");
                self.refresh().await;
                true
            }
            Err(err) => {
                tracing::error!("note upload failed: {err}");
                self.toasts.error("Upload failed. Please try again.");
                false
            }
        }
    }

    /// Fetch a note's file and bump its download counter.
    pub async fn download(mut self, note: &Note) -> Option<DownloadedFile> {
        match self.client().notes().download(note).await {
            Ok(file) => {
                self.refresh().await;
                Some(file)
            }
            Err(err) => {
                tracing::error!("download failed for note {}: {err}", note.id);
                self.toasts.error("Download failed.");
                None
            }
        }
    }

    pub async fn delete(mut self, note_id: &str) -> bool {
        match self.client().notes().delete(note_id).await {
            Ok(()) => {
                self.toasts.success("Note deleted.");
                self.refresh().await;
                true
            }
            Err(err) => {
                tracing::error!("note delete failed: {err}");
                self.toasts.error("Delete failed. Please try again.");
                false
            }
        }
    }
}
