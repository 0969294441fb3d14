//! The seam between the typed resource APIs and the hosted backend.
//!
//! [`Transport`] covers the four surfaces the platform consumes: table-style
//! reads/writes, remote procedure calls, object storage, and auth endpoints.
//! Two implementations exist: [`crate::HttpTransport`] against the hosted
//! service and [`crate::MemoryTransport`] for tests and offline development.
//!
//! Futures are `?Send` because the browser HTTP client's futures are not
//! `Send`; the UI event loop is single-threaded anyway.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;
use crate::models::Session;
use crate::query::Query;

/// Options attached to a sign-up request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignUpOptions {
    /// Where the confirmation email should send the user afterwards.
    pub email_redirect_to: Option<String>,
    /// Display name stored in the auth identity's metadata.
    pub display_name: Option<String>,
}

#[async_trait(?Send)]
pub trait Transport {
    // Table-style access against fixed relations.
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, ClientError>;
    async fn insert(&self, table: &str, row: Value) -> Result<(), ClientError>;
    async fn update(&self, table: &str, patch: Value, query: &Query) -> Result<(), ClientError>;
    async fn delete(&self, table: &str, query: &Query) -> Result<(), ClientError>;

    /// Call a named remote procedure with JSON parameters.
    async fn rpc(&self, function: &str, params: Value) -> Result<Value, ClientError>;

    // Object storage, scoped to a named bucket.
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), ClientError>;
    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, ClientError>;
    async fn remove(&self, bucket: &str, path: &str) -> Result<(), ClientError>;

    // Auth endpoints.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError>;
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: &SignUpOptions,
    ) -> Result<Session, ClientError>;
    async fn sign_out(&self) -> Result<(), ClientError>;
    async fn current_session(&self) -> Result<Option<Session>, ClientError>;
}
