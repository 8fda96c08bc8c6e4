use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{Book, BookThoughtBubble};
use crate::services::{constraint_violation, ServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookThoughtBubble {
    pub book_id: i32,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBookThoughtBubble {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookThoughtBubbleWithBook {
    #[serde(flatten)]
    pub bubble: BookThoughtBubble,
    pub book: Book,
}

#[derive(Clone)]
pub struct BookThoughtBubbleService {
    pool: PgPool,
}

impl BookThoughtBubbleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        data: CreateBookThoughtBubble,
    ) -> Result<BookThoughtBubble, ServiceError> {
        sqlx::query_as::<_, BookThoughtBubble>(
            "INSERT INTO book_thought_bubbles (book_id, content) VALUES ($1, $2) \
             RETURNING id, book_id, content",
        )
        .bind(data.book_id)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)
    }

    pub async fn get_by_id(
        &self,
        id: i32,
    ) -> Result<Option<BookThoughtBubbleWithBook>, ServiceError> {
        let Some(bubble) = sqlx::query_as::<_, BookThoughtBubble>(
            "SELECT id, book_id, content FROM book_thought_bubbles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let book = self.book_of(bubble.book_id).await?;
        Ok(Some(BookThoughtBubbleWithBook { bubble, book }))
    }

    pub async fn get_all(&self) -> Result<Vec<BookThoughtBubbleWithBook>, ServiceError> {
        let bubbles = sqlx::query_as::<_, BookThoughtBubble>(
            "SELECT id, book_id, content FROM book_thought_bubbles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(bubbles.len());
        for bubble in bubbles {
            let book = self.book_of(bubble.book_id).await?;
            out.push(BookThoughtBubbleWithBook { bubble, book });
        }
        Ok(out)
    }

    /// Only the note text is editable; re-pinning to a different book is not
    /// a thing.
    pub async fn update(
        &self,
        id: i32,
        data: UpdateBookThoughtBubble,
    ) -> Result<BookThoughtBubble, ServiceError> {
        let current = sqlx::query_as::<_, BookThoughtBubble>(
            "SELECT id, book_id, content FROM book_thought_bubbles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Book thought bubble not found".to_string()))?;

        let content = data.content.unwrap_or(current.content);

        sqlx::query_as::<_, BookThoughtBubble>(
            "UPDATE book_thought_bubbles SET content = $2 WHERE id = $1 \
             RETURNING id, book_id, content",
        )
        .bind(id)
        .bind(&content)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM book_thought_bubbles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(constraint_violation)?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(
                "Book thought bubble not found".to_string(),
            ));
        }
        Ok(())
    }

    async fn book_of(&self, book_id: i32) -> Result<Book, ServiceError> {
        Ok(
            sqlx::query_as::<_, Book>("SELECT id, title, author_id FROM books WHERE id = $1")
                .bind(book_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }
}
