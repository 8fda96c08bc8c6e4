use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    /// bcrypt hash. Never leaves the process in responses.
    #[serde(skip_serializing)]
    pub password: String,
    pub is_admin: bool,
}
