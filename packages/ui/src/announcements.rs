//! Announcements state hook.

use client::{Announcement, AnnouncementKind, Client};
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::toast::{use_toasts, Toasts};

#[derive(Clone, Copy, PartialEq)]
pub struct UseAnnouncements {
    client: Signal<Client>,
    toasts: Toasts,
    pub announcements: Signal<Vec<Announcement>>,
    pub is_loading: Signal<bool>,
}

pub fn use_announcements() -> UseAnnouncements {
    let client = use_client();
    let toasts = use_toasts();
    let announcements = use_signal(Vec::new);
    let is_loading = use_signal(|| true);
    let hook = UseAnnouncements {
        client,
        toasts,
        announcements,
        is_loading,
    };

    let _ = use_resource(move || async move {
        hook.refresh().await;
    });

    hook
}

impl UseAnnouncements {
    fn client(&self) -> Client {
        (*self.client.peek()).clone()
    }

    pub async fn refresh(mut self) {
        match self.client().announcements().list().await {
            Ok(list) => self.announcements.set(list),
            Err(err) => {
                tracing::error!("failed to load announcements: {err}");
                self.toasts.error("Failed to load announcements.");
            }
        }
        self.is_loading.set(false);
    }

    pub async fn create(
        mut self,
        title: &str,
        content: &str,
        kind: AnnouncementKind,
        author_id: &str,
    ) -> bool {
        match self
            .client()
            .announcements()
            .create(title, content, kind, author_id)
            .await
        {
            Ok(()) => {
                self.toasts.success("Announcement published.");
                self.refresh().await;
                true
            }
            Err(err) => {
                tracing::error!("announcement create failed: {err}");
                self.toasts.error("Could not publish the announcement.");
                false
            }
        }
    }

    pub async fn delete(mut self, id: &str) -> bool {
        match self.client().announcements().delete(id).await {
            Ok(()) => {
                self.toasts.success("Announcement deleted.");
                self.refresh().await;
                true
            }
            Err(err) => {
                tracing::error!("announcement delete failed: {err}");
                self.toasts.error("Delete failed.");
                false
            }
        }
    }
}
