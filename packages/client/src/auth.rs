//! Typed auth operations: sign-in, registration, sign-out, session/profile
//! resolution.
//!
//! Registration is deliberately not transactional: the auth identity is
//! created first, then the profile row. If the profile insert fails the auth
//! identity is left standing and the outcome is reported as
//! [`Registration::ProfilePending`] — the caller tells the user to try
//! logging in. The backend has no compensating delete for a half-registered
//! account.

use std::sync::Arc;

use serde_json::json;

use crate::error::ClientError;
use crate::models::{wire_timestamp, Profile, Session};
use crate::query::Query;
use crate::transport::{SignUpOptions, Transport};

/// Outcome of a successful registration call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// Auth identity and profile row both exist.
    Confirmed,
    /// Auth identity exists but the profile insert failed; the user can
    /// still log in once the profile is repaired.
    ProfilePending,
}

#[derive(Clone)]
pub struct AuthApi {
    transport: Arc<dyn Transport>,
}

impl AuthApi {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sign in and resolve the profile row. A session without a profile row
    /// is treated as a failure.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Profile, ClientError> {
        let session = self.transport.sign_in(email.trim(), password).await?;
        self.fetch_profile(&session.user_id)
            .await?
            .ok_or(ClientError::MissingProfile(session.user_id))
    }

    /// Create an auth identity, then the profile row with `role = student`.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Registration, ClientError> {
        let email = email.trim().to_lowercase();
        let name = name.trim().to_string();
        let options = SignUpOptions {
            email_redirect_to: Some("/login".to_string()),
            display_name: Some(name.clone()),
        };
        let session = self.transport.sign_up(&email, password, &options).await?;

        let now = wire_timestamp();
        let row = json!({
            "id": session.user_id,
            "email": email,
            "name": name,
            "role": "student",
            "created_at": now,
            "updated_at": now,
        });
        if let Err(err) = self.transport.insert("profiles", row).await {
            // The auth identity already exists and is not rolled back.
            tracing::warn!("profile creation failed after sign-up: {err}");
            return Ok(Registration::ProfilePending);
        }
        Ok(Registration::Confirmed)
    }

    pub async fn sign_out(&self) -> Result<(), ClientError> {
        self.transport.sign_out().await
    }

    pub async fn current_session(&self) -> Result<Option<Session>, ClientError> {
        self.transport.current_session().await
    }

    /// Resolve a user's profile row, `None` when it does not exist.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, ClientError> {
        let rows = self
            .transport
            .select("profiles", &Query::new().eq("id", user_id).limit(1))
            .await?;
        rows.into_iter()
            .next()
            .map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTransport;
    use crate::models::Role;
    use crate::Client;

    fn client() -> (Client, MemoryTransport) {
        let transport = MemoryTransport::new();
        let client = Client::new(transport.clone(), Default::default());
        (client, transport)
    }

    #[tokio::test]
    async fn register_creates_auth_identity_and_student_profile() {
        let (client, transport) = client();
        let outcome = client
            .auth()
            .register("  Ada@Example.Co ", "hunter22", " Ada Lovelace ")
            .await
            .unwrap();
        assert_eq!(outcome, Registration::Confirmed);
        assert_eq!(transport.auth_user_count(), 1);

        let profiles = transport.rows("profiles");
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0]["email"], "ada@example.co");
        assert_eq!(profiles[0]["name"], "Ada Lovelace");
        assert_eq!(profiles[0]["role"], "student");
    }

    #[tokio::test]
    async fn failed_sign_up_creates_no_profile_row() {
        let (client, transport) = client();
        transport.fail_on("auth:sign_up");

        let err = client
            .auth()
            .register("ada@example.co", "hunter22", "Ada")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Backend { .. }));
        assert_eq!(transport.auth_user_count(), 0);
        assert!(transport.rows("profiles").is_empty());
    }

    #[tokio::test]
    async fn profile_insert_failure_leaves_auth_identity_standing() {
        let (client, transport) = client();
        transport.fail_on("insert:profiles");

        let outcome = client
            .auth()
            .register("ada@example.co", "hunter22", "Ada")
            .await
            .unwrap();
        assert_eq!(outcome, Registration::ProfilePending);
        // Acknowledged inconsistency: identity without a profile row.
        assert_eq!(transport.auth_user_count(), 1);
        assert!(transport.rows("profiles").is_empty());
    }

    #[tokio::test]
    async fn sign_in_resolves_profile() {
        let (client, _transport) = client();
        client
            .auth()
            .register("ada@example.co", "hunter22", "Ada")
            .await
            .unwrap();

        let profile = client
            .auth()
            .sign_in("ada@example.co", "hunter22")
            .await
            .unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.role, Role::Student);
        assert!(client.auth().current_session().await.unwrap().is_some());

        client.auth().sign_out().await.unwrap();
        assert!(client.auth().current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_in_without_profile_row_fails() {
        let (client, transport) = client();
        transport.seed_auth_user("ghost@example.co", "hunter22", None);

        let err = client
            .auth()
            .sign_in("ghost@example.co", "hunter22")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingProfile(_)));
    }

    #[tokio::test]
    async fn sign_in_with_bad_password_fails() {
        let (client, transport) = client();
        transport.seed_auth_user("ada@example.co", "hunter22", None);

        let err = client
            .auth()
            .sign_in("ada@example.co", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Auth(_)));
    }
}
