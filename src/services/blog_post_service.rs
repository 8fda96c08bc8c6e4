use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{BlogPost, BlogPostThoughtBubble, Book};
use crate::services::{constraint_violation, ServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPost {
    pub title: String,
    pub content: String,
    pub book_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub book_id: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDetail {
    #[serde(flatten)]
    pub blog_post: BlogPost,
    pub book: Option<Book>,
    pub blog_post_thought_bubbles: Vec<BlogPostThoughtBubble>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostWithBook {
    #[serde(flatten)]
    pub blog_post: BlogPost,
    pub book: Option<Book>,
}

#[derive(Clone)]
pub struct BlogPostService {
    pool: PgPool,
}

impl BlogPostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: CreateBlogPost) -> Result<BlogPost, ServiceError> {
        sqlx::query_as::<_, BlogPost>(
            "INSERT INTO blog_posts (title, content, book_id) VALUES ($1, $2, $3) \
             RETURNING id, title, content, book_id",
        )
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.book_id)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<BlogPostDetail>, ServiceError> {
        let Some(blog_post) = sqlx::query_as::<_, BlogPost>(
            "SELECT id, title, content, book_id FROM blog_posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let book = self.book_of(blog_post.book_id).await?;
        let blog_post_thought_bubbles = self.bubbles_of(blog_post.id).await?;

        Ok(Some(BlogPostDetail {
            blog_post,
            book,
            blog_post_thought_bubbles,
        }))
    }

    pub async fn get_all(&self) -> Result<Vec<BlogPostDetail>, ServiceError> {
        let posts = sqlx::query_as::<_, BlogPost>(
            "SELECT id, title, content, book_id FROM blog_posts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(posts.len());
        for blog_post in posts {
            let book = self.book_of(blog_post.book_id).await?;
            let blog_post_thought_bubbles = self.bubbles_of(blog_post.id).await?;
            out.push(BlogPostDetail {
                blog_post,
                book,
                blog_post_thought_bubbles,
            });
        }
        Ok(out)
    }

    pub async fn update(
        &self,
        id: i32,
        data: UpdateBlogPost,
    ) -> Result<BlogPostWithBook, ServiceError> {
        let current = sqlx::query_as::<_, BlogPost>(
            "SELECT id, title, content, book_id FROM blog_posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Blog post not found".to_string()))?;

        let title = data.title.unwrap_or(current.title);
        let content = data.content.unwrap_or(current.content);
        let book_id = data.book_id.or(current.book_id);

        let blog_post = sqlx::query_as::<_, BlogPost>(
            "UPDATE blog_posts SET title = $2, content = $3, book_id = $4 WHERE id = $1 \
             RETURNING id, title, content, book_id",
        )
        .bind(id)
        .bind(&title)
        .bind(&content)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)?;

        let book = self.book_of(blog_post.book_id).await?;
        Ok(BlogPostWithBook { blog_post, book })
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(constraint_violation)?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Blog post not found".to_string()));
        }
        Ok(())
    }

    async fn book_of(&self, book_id: Option<i32>) -> Result<Option<Book>, ServiceError> {
        let Some(book_id) = book_id else {
            return Ok(None);
        };
        Ok(
            sqlx::query_as::<_, Book>("SELECT id, title, author_id FROM books WHERE id = $1")
                .bind(book_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn bubbles_of(
        &self,
        blog_post_id: i32,
    ) -> Result<Vec<BlogPostThoughtBubble>, ServiceError> {
        Ok(sqlx::query_as::<_, BlogPostThoughtBubble>(
            "SELECT id, blog_post_id, content FROM blog_post_thought_bubbles \
             WHERE blog_post_id = $1 ORDER BY id",
        )
        .bind(blog_post_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
