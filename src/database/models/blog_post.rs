use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Blog posts may discuss a specific book, but don't have to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub book_id: Option<i32>,
}
