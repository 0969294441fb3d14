//! Discussion forum state hook.

use client::{Client, ForumPost};
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::toast::{use_toasts, Toasts};

#[derive(Clone, Copy, PartialEq)]
pub struct UseForum {
    client: Signal<Client>,
    toasts: Toasts,
    pub posts: Signal<Vec<ForumPost>>,
    pub is_loading: Signal<bool>,
}

pub fn use_forum() -> UseForum {
    let client = use_client();
    let toasts = use_toasts();
    let posts = use_signal(Vec::new);
    let is_loading = use_signal(|| true);
    let hook = UseForum {
        client,
        toasts,
        posts,
        is_loading,
    };

    let _ = use_resource(move || async move {
        hook.refresh().await;
    });

    hook
}

impl UseForum {
    fn client(&self) -> Client {
        (*self.client.peek()).clone()
    }

    pub async fn refresh(mut self) {
        match self.client().forum().list().await {
            Ok(list) => self.posts.set(list),
            Err(err) => {
                tracing::error!("failed to load forum topics: {err}");
                self.toasts.error("Failed to load the forum.");
            }
        }
        self.is_loading.set(false);
    }

    pub async fn create_topic(mut self, title: &str, content: &str, author_id: &str) -> bool {
        match self
            .client()
            .forum()
            .create_topic(title, content, author_id)
            .await
        {
            Ok(()) => {
                self.toasts.success("Topic posted.");
                self.refresh().await;
                true
            }
            Err(err) => {
                tracing::error!("topic create failed: {err}");
                self.toasts.error("Could not post the topic.");
                false
            }
        }
    }

    pub async fn create_reply(mut self, topic_id: &str, content: &str, author_id: &str) -> bool {
        match self
            .client()
            .forum()
            .create_reply(topic_id, content, author_id)
            .await
        {
            Ok(()) => {
                self.toasts.success("Reply posted.");
                self.refresh().await;
                true
            }
            Err(err) => {
                tracing::error!("reply create failed: {err}");
                self.toasts.error("Could not post the reply.");
                false
            }
        }
    }
}
