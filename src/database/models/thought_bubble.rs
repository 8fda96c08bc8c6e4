use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Short margin notes pinned to a book.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookThoughtBubble {
    pub id: i32,
    pub book_id: i32,
    pub content: String,
}

/// Short margin notes pinned to a blog post.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostThoughtBubble {
    pub id: i32,
    pub blog_post_id: i32,
    pub content: String,
}
