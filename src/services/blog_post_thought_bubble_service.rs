use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{BlogPost, BlogPostThoughtBubble};
use crate::services::{constraint_violation, ServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPostThoughtBubble {
    pub blog_post_id: i32,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBlogPostThoughtBubble {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostThoughtBubbleWithPost {
    #[serde(flatten)]
    pub bubble: BlogPostThoughtBubble,
    pub blog_post: BlogPost,
}

#[derive(Clone)]
pub struct BlogPostThoughtBubbleService {
    pool: PgPool,
}

impl BlogPostThoughtBubbleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        data: CreateBlogPostThoughtBubble,
    ) -> Result<BlogPostThoughtBubble, ServiceError> {
        sqlx::query_as::<_, BlogPostThoughtBubble>(
            "INSERT INTO blog_post_thought_bubbles (blog_post_id, content) VALUES ($1, $2) \
             RETURNING id, blog_post_id, content",
        )
        .bind(data.blog_post_id)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)
    }

    pub async fn get_by_id(
        &self,
        id: i32,
    ) -> Result<Option<BlogPostThoughtBubbleWithPost>, ServiceError> {
        let Some(bubble) = sqlx::query_as::<_, BlogPostThoughtBubble>(
            "SELECT id, blog_post_id, content FROM blog_post_thought_bubbles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let blog_post = self.post_of(bubble.blog_post_id).await?;
        Ok(Some(BlogPostThoughtBubbleWithPost { bubble, blog_post }))
    }

    pub async fn get_all(&self) -> Result<Vec<BlogPostThoughtBubbleWithPost>, ServiceError> {
        let bubbles = sqlx::query_as::<_, BlogPostThoughtBubble>(
            "SELECT id, blog_post_id, content FROM blog_post_thought_bubbles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(bubbles.len());
        for bubble in bubbles {
            let blog_post = self.post_of(bubble.blog_post_id).await?;
            out.push(BlogPostThoughtBubbleWithPost { bubble, blog_post });
        }
        Ok(out)
    }

    pub async fn update(
        &self,
        id: i32,
        data: UpdateBlogPostThoughtBubble,
    ) -> Result<BlogPostThoughtBubble, ServiceError> {
        let current = sqlx::query_as::<_, BlogPostThoughtBubble>(
            "SELECT id, blog_post_id, content FROM blog_post_thought_bubbles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound("Blog post thought bubble not found".to_string())
        })?;

        let content = data.content.unwrap_or(current.content);

        sqlx::query_as::<_, BlogPostThoughtBubble>(
            "UPDATE blog_post_thought_bubbles SET content = $2 WHERE id = $1 \
             RETURNING id, blog_post_id, content",
        )
        .bind(id)
        .bind(&content)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM blog_post_thought_bubbles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(constraint_violation)?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(
                "Blog post thought bubble not found".to_string(),
            ));
        }
        Ok(())
    }

    async fn post_of(&self, blog_post_id: i32) -> Result<BlogPost, ServiceError> {
        Ok(sqlx::query_as::<_, BlogPost>(
            "SELECT id, title, content, book_id FROM blog_posts WHERE id = $1",
        )
        .bind(blog_post_id)
        .fetch_one(&self.pool)
        .await?)
    }
}
