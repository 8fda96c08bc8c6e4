use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{Book, Quote};
use crate::services::{constraint_violation, ServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuote {
    pub book_id: i32,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateQuote {
    pub book_id: Option<i32>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteWithBook {
    #[serde(flatten)]
    pub quote: Quote,
    pub book: Book,
}

#[derive(Clone)]
pub struct QuoteService {
    pool: PgPool,
}

impl QuoteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: CreateQuote) -> Result<Quote, ServiceError> {
        sqlx::query_as::<_, Quote>(
            "INSERT INTO quotes (book_id, content) VALUES ($1, $2) \
             RETURNING id, book_id, content",
        )
        .bind(data.book_id)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<QuoteWithBook>, ServiceError> {
        let Some(quote) =
            sqlx::query_as::<_, Quote>("SELECT id, book_id, content FROM quotes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
        else {
            return Ok(None);
        };

        let book = self.book_of(quote.book_id).await?;
        Ok(Some(QuoteWithBook { quote, book }))
    }

    pub async fn get_all(&self) -> Result<Vec<QuoteWithBook>, ServiceError> {
        let quotes =
            sqlx::query_as::<_, Quote>("SELECT id, book_id, content FROM quotes ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let mut out = Vec::with_capacity(quotes.len());
        for quote in quotes {
            let book = self.book_of(quote.book_id).await?;
            out.push(QuoteWithBook { quote, book });
        }
        Ok(out)
    }

    pub async fn update(&self, id: i32, data: UpdateQuote) -> Result<QuoteWithBook, ServiceError> {
        let current =
            sqlx::query_as::<_, Quote>("SELECT id, book_id, content FROM quotes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Quote not found".to_string()))?;

        let book_id = data.book_id.unwrap_or(current.book_id);
        let content = data.content.unwrap_or(current.content);

        let quote = sqlx::query_as::<_, Quote>(
            "UPDATE quotes SET book_id = $2, content = $3 WHERE id = $1 \
             RETURNING id, book_id, content",
        )
        .bind(id)
        .bind(book_id)
        .bind(&content)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)?;

        let book = self.book_of(quote.book_id).await?;
        Ok(QuoteWithBook { quote, book })
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(constraint_violation)?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Quote not found".to_string()));
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
