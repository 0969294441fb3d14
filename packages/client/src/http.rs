//! HTTP transport against the hosted backend.
//!
//! Speaks the service's REST conventions: tables under `/rest/v1/<table>`
//! with the query string from [`Query::to_query_string`], remote procedures
//! under `/rest/v1/rpc/<function>`, object storage under
//! `/storage/v1/object/<bucket>/<path>`, and auth under `/auth/v1/*`. Every
//! request carries the anonymous API key; once a session exists its access
//! token is used as the bearer credential instead, which is what makes the
//! backend's row-level authorization see the caller's identity.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::AcademyConfig;
use crate::error::ClientError;
use crate::models::Session;
use crate::query::Query;
use crate::transport::{SignUpOptions, Transport};

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    session: Arc<Mutex<Option<Session>>>,
}

#[derive(Deserialize)]
struct AuthUserBody {
    id: String,
    email: String,
}

#[derive(Deserialize)]
struct AuthBody {
    access_token: Option<String>,
    user: Option<AuthUserBody>,
}

impl HttpTransport {
    pub fn new(config: &AcademyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend.url.trim_end_matches('/').to_string(),
            anon_key: config.backend.anon_key.clone(),
            session: Arc::new(Mutex::new(None)),
        }
    }

    fn bearer(&self) -> String {
        let session = self.session.lock().unwrap();
        match session.as_ref() {
            Some(s) if !s.access_token.is_empty() => s.access_token.clone(),
            _ => self.anon_key.clone(),
        }
    }

    fn table_url(&self, table: &str, query: &Query) -> String {
        let qs = query.to_query_string();
        if qs.is_empty() {
            format!("{}/rest/v1/{table}", self.base_url)
        } else {
            format!("{}/rest/v1/{table}?{qs}", self.base_url)
        }
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
    }

    async fn expect_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    fn session_from_body(&self, body: AuthBody) -> Result<Session, ClientError> {
        let user = body
            .user
            .ok_or_else(|| ClientError::Auth("no user data returned".to_string()))?;
        let session = Session {
            access_token: body.access_token.unwrap_or_default(),
            user_id: user.id,
            email: user.email,
        };
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(session)
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, ClientError> {
        let response = self
            .authed(self.http.get(self.table_url(table, query)))
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<(), ClientError> {
        let response = self
            .authed(self.http.post(self.table_url(table, &Query::new())))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn update(&self, table: &str, patch: Value, query: &Query) -> Result<(), ClientError> {
        let response = self
            .authed(self.http.patch(self.table_url(table, query)))
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<(), ClientError> {
        let response = self
            .authed(self.http.delete(self.table_url(table, query)))
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn rpc(&self, function: &str, params: Value) -> Result<Value, ClientError> {
        let url = format!("{}/rest/v1/rpc/{function}", self.base_url);
        let response = self.authed(self.http.post(url)).json(&params).send().await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), ClientError> {
        let url = format!("{}/storage/v1/object/{bucket}/{path}", self.base_url);
        let response = self.authed(self.http.post(url)).body(bytes).send().await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}/storage/v1/object/{bucket}/{path}", self.base_url);
        let response = self.authed(self.http.get(url)).send().await?;
        let response = Self::expect_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), ClientError> {
        let url = format!("{}/storage/v1/object/{bucket}/{path}", self.base_url);
        let response = self.authed(self.http.delete(url)).send().await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(message));
        }
        self.session_from_body(response.json().await?)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: &SignUpOptions,
    ) -> Result<Session, ClientError> {
        let mut url = format!("{}/auth/v1/signup", self.base_url);
        if let Some(redirect) = &options.email_redirect_to {
            url = format!("{url}?redirect_to={redirect}");
        }
        let mut body = json!({ "email": email, "password": password });
        if let Some(name) = &options.display_name {
            body["data"] = json!({ "full_name": name });
        }
        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(message));
        }
        self.session_from_body(response.json().await?)
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self.authed(self.http.post(url)).send().await?;
        *self.session.lock().unwrap() = None;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, ClientError> {
        Ok(self.session.lock().unwrap().clone())
    }
}
