use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{Author, BlogPost, Book, BookThoughtBubble, Review};
use crate::services::{constraint_violation, ServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: String,
    pub author_id: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author_id: Option<i32>,
}

/// Detail shape: everything hanging off the book.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
    pub reviews: Vec<Review>,
    pub blogposts: Vec<BlogPost>,
    pub book_thought_bubbles: Vec<BookThoughtBubble>,
}

/// Listing shape: the catalog view carries the author and the margin notes
/// but not reviews or blog posts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListing {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
    pub book_thought_bubbles: Vec<BookThoughtBubble>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
}

#[derive(Clone)]
pub struct BookService {
    pool: PgPool,
}

impl BookService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: CreateBook) -> Result<Book, ServiceError> {
        sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author_id) VALUES ($1, $2) \
             RETURNING id, title, author_id",
        )
        .bind(&data.title)
        .bind(data.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<BookDetail>, ServiceError> {
        let Some(book) =
            sqlx::query_as::<_, Book>("SELECT id, title, author_id FROM books WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
        else {
            return Ok(None);
        };

        let author = self.author_of(book.author_id).await?;
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT id, book_id, content FROM reviews WHERE book_id = $1 ORDER BY id",
        )
        .bind(book.id)
        .fetch_all(&self.pool)
        .await?;
        let blogposts = sqlx::query_as::<_, BlogPost>(
            "SELECT id, title, content, book_id FROM blog_posts WHERE book_id = $1 ORDER BY id",
        )
        .bind(book.id)
        .fetch_all(&self.pool)
        .await?;
        let book_thought_bubbles = self.bubbles_of(book.id).await?;

        Ok(Some(BookDetail {
            book,
            author,
            reviews,
            blogposts,
            book_thought_bubbles,
        }))
    }

    pub async fn get_all(&self) -> Result<Vec<BookListing>, ServiceError> {
        let books =
            sqlx::query_as::<_, Book>("SELECT id, title, author_id FROM books ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let mut out = Vec::with_capacity(books.len());
        for book in books {
            let author = self.author_of(book.author_id).await?;
            let book_thought_bubbles = self.bubbles_of(book.id).await?;
            out.push(BookListing {
                book,
                author,
                book_thought_bubbles,
            });
        }
        Ok(out)
    }

    pub async fn update(&self, id: i32, data: UpdateBook) -> Result<BookWithAuthor, ServiceError> {
        let current =
            sqlx::query_as::<_, Book>("SELECT id, title, author_id FROM books WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Book not found".to_string()))?;

        let title = data.title.unwrap_or(current.title);
        let author_id = data.author_id.unwrap_or(current.author_id);

        let book = sqlx::query_as::<_, Book>(
            "UPDATE books SET title = $2, author_id = $3 WHERE id = $1 \
             RETURNING id, title, author_id",
        )
        .bind(id)
        .bind(&title)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)?;

        let author = self.author_of(book.author_id).await?;
        Ok(BookWithAuthor { book, author })
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(constraint_violation)?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Book not found".to_string()));
        }
        Ok(())
    }

    async fn author_of(&self, author_id: i32) -> Result<Author, ServiceError> {
        Ok(sqlx::query_as::<_, Author>(
            "SELECT id, name, image_url FROM authors WHERE id = $1",
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn bubbles_of(&self, book_id: i32) -> Result<Vec<BookThoughtBubble>, ServiceError> {
        Ok(sqlx::query_as::<_, BookThoughtBubble>(
            "SELECT id, book_id, content FROM book_thought_bubbles WHERE book_id = $1 ORDER BY id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_shape_carries_relations_in_camel_case() {
        let detail = BookDetail {
            book: Book {
                id: 3,
                title: "The Trial".to_string(),
                author_id: 1,
            },
            author: Author {
                id: 1,
                name: "Franz Kafka".to_string(),
                image_url: None,
            },
            reviews: vec![],
            blogposts: vec![],
            book_thought_bubbles: vec![BookThoughtBubble {
                id: 9,
                book_id: 3,
                content: "bureaucracy as nightmare".to_string(),
            }],
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["title"], "The Trial");
        assert_eq!(value["authorId"], 1);
        assert_eq!(value["author"]["name"], "Franz Kafka");
        assert_eq!(value["bookThoughtBubbles"][0]["bookId"], 3);
    }
}
