use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{Book, Review};
use crate::services::{constraint_violation, ServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub book_id: i32,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateReview {
    pub book_id: Option<i32>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithBook {
    #[serde(flatten)]
    pub review: Review,
    pub book: Book,
}

#[derive(Clone)]
pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: CreateReview) -> Result<Review, ServiceError> {
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (book_id, content) VALUES ($1, $2) \
             RETURNING id, book_id, content",
        )
        .bind(data.book_id)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<ReviewWithBook>, ServiceError> {
        let Some(review) =
            sqlx::query_as::<_, Review>("SELECT id, book_id, content FROM reviews WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
        else {
            return Ok(None);
        };

        let book = self.book_of(review.book_id).await?;
        Ok(Some(ReviewWithBook { review, book }))
    }

    pub async fn get_all(&self) -> Result<Vec<ReviewWithBook>, ServiceError> {
        let reviews =
            sqlx::query_as::<_, Review>("SELECT id, book_id, content FROM reviews ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let mut out = Vec::with_capacity(reviews.len());
        for review in reviews {
            let book = self.book_of(review.book_id).await?;
            out.push(ReviewWithBook { review, book });
        }
        Ok(out)
    }

    pub async fn update(&self, id: i32, data: UpdateReview) -> Result<ReviewWithBook, ServiceError> {
        let current =
            sqlx::query_as::<_, Review>("SELECT id, book_id, content FROM reviews WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Review not found".to_string()))?;

        let book_id = data.book_id.unwrap_or(current.book_id);
        let content = data.content.unwrap_or(current.content);

        let review = sqlx::query_as::<_, Review>(
            "UPDATE reviews SET book_id = $2, content = $3 WHERE id = $1 \
             RETURNING id, book_id, content",
        )
        .bind(id)
        .bind(book_id)
        .bind(&content)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)?;

        let book = self.book_of(review.book_id).await?;
        Ok(ReviewWithBook { review, book })
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(constraint_violation)?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Review not found".to_string()));
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
