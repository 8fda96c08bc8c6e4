use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::User;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already taken")]
    DuplicateUsername,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// The slice of the data layer the credential service needs. Username
/// uniqueness is the store's job; callers never pre-check it.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, StoreError>;
}

#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, is_admin FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, StoreError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, is_admin) VALUES ($1, $2, $3) \
             RETURNING id, username, password, is_admin",
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await;

        match created {
            Ok(user) => Ok(user),
            // 23505: unique_violation on users.username
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some("23505") => {
                Err(StoreError::DuplicateUsername)
            }
            Err(other) => Err(other.into()),
        }
    }
}
