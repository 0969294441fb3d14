//! In-memory transport for tests and offline development.
//!
//! Holds every relation as a list of JSON rows behind a mutex, mirrors the
//! three remote procedures the platform consumes (author joins and reply
//! counts computed locally), and keeps uploaded objects in a map keyed by
//! `bucket/path`. Failure injection via [`MemoryTransport::fail_on`] lets
//! tests exercise the error paths: any operation whose key is registered
//! fails with a synthetic backend error until the flags are cleared.
//!
//! Operation keys follow `verb:table` for table access (`"insert:notes"`),
//! `rpc:<function>` for remote procedures, `storage:<verb>` for object
//! storage, and `auth:<verb>` for the auth endpoints.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ClientError;
use crate::models::Session;
use crate::query::{Direction, Query};
use crate::transport::{SignUpOptions, Transport};

#[derive(Debug)]
struct AuthUser {
    id: String,
    email: String,
    password: String,
    #[allow(dead_code)]
    display_name: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, Vec<Value>>,
    objects: HashMap<String, Vec<u8>>,
    auth_users: Vec<AuthUser>,
    session: Option<Session>,
    failing: HashSet<String>,
    next_id: u64,
}

impl State {
    fn assign_id(&mut self, table: &str, row: &mut Value) -> String {
        if let Some(id) = row.get("id").and_then(Value::as_str) {
            return id.to_string();
        }
        self.next_id += 1;
        let id = format!("{table}-{}", self.next_id);
        row["id"] = Value::String(id.clone());
        id
    }
}

/// In-memory [`Transport`] with failure injection.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<State>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation with this key fail until cleared.
    pub fn fail_on(&self, operation: &str) {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(operation.to_string());
    }

    pub fn clear_failures(&self) {
        self.state.lock().unwrap().failing.clear();
    }

    /// Insert a row directly, bypassing failure injection. Returns the id.
    pub fn seed(&self, table: &str, mut row: Value) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.assign_id(table, &mut row);
        state.tables.entry(table.to_string()).or_default().push(row);
        id
    }

    /// Register an auth identity directly. Returns the user id.
    pub fn seed_auth_user(&self, email: &str, password: &str, name: Option<&str>) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("user-{}", state.next_id);
        state.auth_users.push(AuthUser {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
            display_name: name.map(str::to_string),
        });
        id
    }

    /// Current contents of a relation, for assertions.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_object(&self, bucket: &str, path: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .objects
            .contains_key(&format!("{bucket}/{path}"))
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }

    pub fn auth_user_count(&self) -> usize {
        self.state.lock().unwrap().auth_users.len()
    }

    fn guard(&self, operation: &str) -> Result<(), ClientError> {
        if self.state.lock().unwrap().failing.contains(operation) {
            return Err(ClientError::Backend {
                status: 400,
                message: format!("injected failure: {operation}"),
            });
        }
        Ok(())
    }
}

fn field_str<'a>(row: &'a Value, key: &str) -> Option<&'a str> {
    row.get(key).and_then(Value::as_str)
}

fn matches(row: &Value, query: &Query) -> bool {
    query.filters().iter().all(|(column, value)| {
        match row.get(column) {
            Some(Value::String(s)) => s == value,
            Some(Value::Number(n)) => n.to_string() == *value,
            Some(Value::Bool(b)) => b.to_string() == *value,
            _ => false,
        }
    })
}

fn apply_order(rows: &mut [Value], query: &Query) {
    if let Some(order) = query.order() {
        // RFC 3339 timestamps are fixed width, so string comparison is
        // chronological; stable sort keeps insertion order on ties.
        rows.sort_by(|a, b| {
            let left = field_str(a, &order.column).unwrap_or_default();
            let right = field_str(b, &order.column).unwrap_or_default();
            match order.direction {
                Direction::Ascending => left.cmp(right),
                Direction::Descending => right.cmp(left),
            }
        });
    }
}

/// Sort a derived row set by `created_at`.
fn order_by_created_at(rows: &mut [Value], direction: Direction) {
    rows.sort_by(|a, b| {
        let left = field_str(a, "created_at").unwrap_or_default();
        let right = field_str(b, "created_at").unwrap_or_default();
        match direction {
            Direction::Ascending => left.cmp(right),
            Direction::Descending => right.cmp(left),
        }
    });
}

impl MemoryTransport {
    /// Author display fields for a row's `author_id`, nulls when the profile
    /// row is missing (the typed mappers apply the `Unknown`/`student`
    /// fallbacks, as the views expect).
    fn author_fields(state: &State, row: &Value) -> (Value, Value) {
        let author_id = field_str(row, "author_id");
        let profile = author_id.and_then(|id| {
            state
                .tables
                .get("profiles")
                .and_then(|rows| rows.iter().find(|p| field_str(p, "id") == Some(id)))
        });
        match profile {
            Some(p) => (
                p.get("name").cloned().unwrap_or(Value::Null),
                p.get("role").cloned().unwrap_or(Value::Null),
            ),
            None => (Value::Null, Value::Null),
        }
    }

    fn run_rpc(&self, function: &str, params: &Value) -> Result<Value, ClientError> {
        let state = self.state.lock().unwrap();
        match function {
            "get_announcements_with_authors" => {
                let mut rows: Vec<Value> = state
                    .tables
                    .get("announcements")
                    .map(|rows| rows.as_slice())
                    .unwrap_or_default()
                    .iter()
                    .map(|row| {
                        let (name, role) = Self::author_fields(&state, row);
                        json!({
                            "id": row.get("id"),
                            "title": row.get("title"),
                            "content": row.get("content"),
                            "type": row.get("type"),
                            "created_at": row.get("created_at"),
                            "author_name": name,
                            "author_role": role,
                        })
                    })
                    .collect();
                order_by_created_at(&mut rows, Direction::Descending);
                Ok(Value::Array(rows))
            }
            "get_forum_posts_with_authors" => {
                let posts = state
                    .tables
                    .get("posts")
                    .map(|rows| rows.as_slice())
                    .unwrap_or_default();
                let mut rows: Vec<Value> = state
                    .tables
                    .get("topics")
                    .map(|rows| rows.as_slice())
                    .unwrap_or_default()
                    .iter()
                    .map(|row| {
                        let (name, role) = Self::author_fields(&state, row);
                        let topic_id = field_str(row, "id");
                        let reply_count = posts
                            .iter()
                            .filter(|p| field_str(p, "topic_id") == topic_id)
                            .count();
                        json!({
                            "id": row.get("id"),
                            "title": row.get("title"),
                            "content": row.get("content"),
                            "created_at": row.get("created_at"),
                            "author_name": name,
                            "author_role": role,
                            "reply_count": reply_count,
                        })
                    })
                    .collect();
                order_by_created_at(&mut rows, Direction::Descending);
                Ok(Value::Array(rows))
            }
            "get_forum_replies_with_authors" => {
                let topic_id = params
                    .get("topic_id_param")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let mut rows: Vec<Value> = state
                    .tables
                    .get("posts")
                    .map(|rows| rows.as_slice())
                    .unwrap_or_default()
                    .iter()
                    .filter(|row| field_str(row, "topic_id") == Some(topic_id))
                    .map(|row| {
                        let (name, role) = Self::author_fields(&state, row);
                        json!({
                            "id": row.get("id"),
                            "content": row.get("content"),
                            "created_at": row.get("created_at"),
                            "author_name": name,
                            "author_role": role,
                        })
                    })
                    .collect();
                order_by_created_at(&mut rows, Direction::Ascending);
                Ok(Value::Array(rows))
            }
            _ => Err(ClientError::Backend {
                status: 404,
                message: format!("unknown function: {function}"),
            }),
        }
    }
}

#[async_trait(?Send)]
impl Transport for MemoryTransport {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, ClientError> {
        self.guard(&format!("select:{table}"))?;
        let state = self.state.lock().unwrap();
        let mut rows: Vec<Value> = state
            .tables
            .get(table)
            .map(|rows| rows.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|row| matches(row, query))
            .cloned()
            .collect();
        apply_order(&mut rows, query);
        if let Some(limit) = query.row_limit() {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, mut row: Value) -> Result<(), ClientError> {
        self.guard(&format!("insert:{table}"))?;
        let mut state = self.state.lock().unwrap();
        state.assign_id(table, &mut row);
        state.tables.entry(table.to_string()).or_default().push(row);
        Ok(())
    }

    async fn update(&self, table: &str, patch: Value, query: &Query) -> Result<(), ClientError> {
        self.guard(&format!("update:{table}"))?;
        let mut state = self.state.lock().unwrap();
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches(row, query)) {
                if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
                    for (key, value) in fields {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<(), ClientError> {
        self.guard(&format!("delete:{table}"))?;
        let mut state = self.state.lock().unwrap();
        if let Some(rows) = state.tables.get_mut(table) {
            rows.retain(|row| !matches(row, query));
        }
        Ok(())
    }

    async fn rpc(&self, function: &str, params: Value) -> Result<Value, ClientError> {
        self.guard(&format!("rpc:{function}"))?;
        self.run_rpc(function, &params)
    }

    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), ClientError> {
        self.guard("storage:upload")?;
        self.state
            .lock()
            .unwrap()
            .objects
            .insert(format!("{bucket}/{path}"), bytes);
        Ok(())
    }

    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>, ClientError> {
        self.guard("storage:download")?;
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&format!("{bucket}/{path}"))
            .cloned()
            .ok_or(ClientError::Backend {
                status: 404,
                message: format!("object not found: {bucket}/{path}"),
            })
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), ClientError> {
        self.guard("storage:remove")?;
        self.state
            .lock()
            .unwrap()
            .objects
            .remove(&format!("{bucket}/{path}"));
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        self.guard("auth:sign_in")?;
        let mut state = self.state.lock().unwrap();
        let user = state
            .auth_users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or_else(|| ClientError::Auth("invalid login credentials".to_string()))?;
        let session = Session {
            access_token: format!("token-{}", user.id),
            user_id: user.id.clone(),
            email: user.email.clone(),
        };
        state.session = Some(session.clone());
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: &SignUpOptions,
    ) -> Result<Session, ClientError> {
        self.guard("auth:sign_up")?;
        let mut state = self.state.lock().unwrap();
        if state.auth_users.iter().any(|u| u.email == email) {
            return Err(ClientError::Auth(
                "an account with this email already exists".to_string(),
            ));
        }
        state.next_id += 1;
        let id = format!("user-{}", state.next_id);
        state.auth_users.push(AuthUser {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
            display_name: options.display_name.clone(),
        });
        let session = Session {
            access_token: format!("token-{id}"),
            user_id: id,
            email: email.to_string(),
        };
        state.session = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        self.guard("auth:sign_out")?;
        self.state.lock().unwrap().session = None;
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>, ClientError> {
        Ok(self.state.lock().unwrap().session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn select_filters_orders_and_limits() {
        let transport = MemoryTransport::new();
        transport.seed("notes", json!({"title": "a", "upload_date": "2024-01-01T00:00:00.000000Z"}));
        transport.seed("notes", json!({"title": "b", "upload_date": "2024-03-01T00:00:00.000000Z"}));
        transport.seed("notes", json!({"title": "c", "upload_date": "2024-02-01T00:00:00.000000Z"}));

        let rows = transport
            .select("notes", &Query::new().order_desc("upload_date"))
            .await
            .unwrap();
        let titles: Vec<&str> = rows.iter().map(|r| field_str(r, "title").unwrap()).collect();
        assert_eq!(titles, vec!["b", "c", "a"]);

        let rows = transport
            .select("notes", &Query::new().eq("title", "c"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);

        let rows = transport
            .select("notes", &Query::new().order_asc("upload_date").limit(2))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(field_str(&rows[0], "title"), Some("a"));
    }

    #[tokio::test]
    async fn update_merges_patch_fields() {
        let transport = MemoryTransport::new();
        let id = transport.seed("notes", json!({"title": "a", "download_count": 0}));
        transport
            .update(
                "notes",
                json!({"download_count": 3}),
                &Query::new().eq("id", &id),
            )
            .await
            .unwrap();
        let rows = transport.rows("notes");
        assert_eq!(rows[0]["download_count"], json!(3));
        assert_eq!(rows[0]["title"], json!("a"));
    }

    #[tokio::test]
    async fn injected_failures_block_and_clear() {
        let transport = MemoryTransport::new();
        transport.fail_on("insert:topics");
        let err = transport
            .insert("topics", json!({"title": "t"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Backend { status: 400, .. }));
        assert!(transport.rows("topics").is_empty());

        transport.clear_failures();
        transport.insert("topics", json!({"title": "t"})).await.unwrap();
        assert_eq!(transport.rows("topics").len(), 1);
    }

    #[tokio::test]
    async fn rpc_joins_author_display_fields() {
        let transport = MemoryTransport::new();
        transport.seed(
            "profiles",
            json!({"id": "u-1", "name": "Dana", "role": "admin"}),
        );
        transport.seed(
            "announcements",
            json!({
                "title": "Exam",
                "content": "Friday",
                "type": "urgent",
                "author_id": "u-1",
                "created_at": "2024-01-01T00:00:00.000000Z",
            }),
        );

        let rows = transport
            .rpc("get_announcements_with_authors", json!({}))
            .await
            .unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["author_name"], json!("Dana"));
        assert_eq!(rows[0]["author_role"], json!("admin"));
    }

    #[tokio::test]
    async fn rpc_missing_author_yields_nulls() {
        let transport = MemoryTransport::new();
        transport.seed(
            "topics",
            json!({"title": "t", "content": "c", "author_id": "ghost",
                   "created_at": "2024-01-01T00:00:00.000000Z"}),
        );
        let rows = transport
            .rpc("get_forum_posts_with_authors", json!({}))
            .await
            .unwrap();
        assert_eq!(rows[0]["author_name"], Value::Null);
        assert_eq!(rows[0]["reply_count"], json!(0));
    }

    #[tokio::test]
    async fn unknown_rpc_is_an_error() {
        let transport = MemoryTransport::new();
        let err = transport.rpc("no_such_function", json!({})).await.unwrap_err();
        assert!(matches!(err, ClientError::Backend { status: 404, .. }));
    }

    #[tokio::test]
    async fn auth_round_trip() {
        let transport = MemoryTransport::new();
        transport.seed_auth_user("a@b.co", "hunter22", Some("Ada"));

        let err = transport.sign_in("a@b.co", "wrong").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(_)));
        assert!(transport.current_session().await.unwrap().is_none());

        let session = transport.sign_in("a@b.co", "hunter22").await.unwrap();
        assert_eq!(session.email, "a@b.co");
        assert_eq!(transport.current_session().await.unwrap(), Some(session));

        transport.sign_out().await.unwrap();
        assert!(transport.current_session().await.unwrap().is_none());
    }
}
