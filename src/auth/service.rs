use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::auth::claims::{Claims, TokenCodec, TokenRejection};
use crate::auth::store::{CredentialStore, StoreError};
use crate::database::models::User;

/// Work factor for password hashing. Deliberately slow; raising it is a
/// config change, not a code change.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("username already taken")]
    Conflict,

    #[error("credential store error: {0}")]
    Store(#[source] StoreError),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("token generation failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => AuthError::Conflict,
            other => AuthError::Store(other),
        }
    }
}

/// One-way salted hash of a password. Also used by the provisioning CLI to
/// create administrator accounts out-of-band.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Turns username/password pairs into verified identities and verified
/// identities into signed, time-bounded tokens. Holds no state between
/// calls; the store handle is injected at construction.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    codec: TokenCodec,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, codec: TokenCodec) -> Self {
        Self {
            store,
            codec,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn token_codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<User, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::Validation("username must not be empty".into()));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("password must not be empty".into()));
        }

        // bcrypt is CPU-bound by design; keep it off the request workers.
        let hash = {
            let password = password.to_string();
            let cost = self.bcrypt_cost;
            tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??
        };
        let user = self.store.insert(username, &hash, is_admin).await?;

        debug!(user_id = user.id, "registered user");
        Ok(user)
    }

    /// `Ok(None)` covers both unknown username and wrong password, so the
    /// route layer can answer with one uniform message. Errors mean the
    /// service itself failed, not that the credentials were wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<String>, AuthError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            return Ok(None);
        };

        let matches = {
            let password = password.to_string();
            let hash = user.password.clone();
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??
        };
        if !matches {
            return Ok(None);
        }

        let token = self.codec.issue(user.id, user.is_admin)?;
        debug!(user_id = user.id, "issued token");
        Ok(Some(token))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenRejection> {
        self.codec.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryCredentialStore;

    // MIN_COST keeps the hashing rounds out of the test runtime.
    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryCredentialStore::default()),
            TokenCodec::new("test-secret-key-12345", 3600),
        )
        .with_cost(4)
    }

    #[tokio::test]
    async fn register_then_login_yields_token_for_same_subject() {
        let auth = service();
        let user = auth.register("alice", "secret123", false).await.unwrap();

        let token = auth.login("alice", "secret123").await.unwrap().unwrap();
        let claims = auth.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert!(!claims.admin);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_none_not_error() {
        let auth = service();
        auth.register("alice", "secret123", false).await.unwrap();

        let result = auth.login("alice", "wrongpassword").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn login_with_unknown_username_is_none() {
        let auth = service();
        let result = auth.login("nobody", "secret123").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn admin_flag_is_copied_into_claims_at_issuance() {
        let auth = service();
        let user = auth.register("root", "hunter2", true).await.unwrap();

        let token = auth.login("root", "hunter2").await.unwrap().unwrap();
        let claims = auth.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert!(claims.admin);
    }

    #[tokio::test]
    async fn empty_username_or_password_fails_validation() {
        let auth = service();

        let err = auth.register("", "secret123", false).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = auth.register("alice", "", false).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let auth = service();
        auth.register("alice", "secret123", false).await.unwrap();

        let err = auth.register("alice", "other", false).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn registered_user_serializes_without_password_field() {
        let auth = service();
        let user = auth.register("alice", "secret123", false).await.unwrap();

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["username"], "alice");
        assert_eq!(value["isAdmin"], false);
        assert!(value.get("password").is_none());
    }

    #[test]
    fn hash_password_output_verifies() {
        let hash = hash_password("secret123", 4).unwrap();
        assert!(bcrypt::verify("secret123", &hash).unwrap());
        assert!(!bcrypt::verify("secret124", &hash).unwrap());
    }
}
