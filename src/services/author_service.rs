use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{Author, Book};
use crate::services::{constraint_violation, ServiceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAuthor {
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWithBooks {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorService {
    pool: PgPool,
}

impl AuthorService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: CreateAuthor) -> Result<Author, ServiceError> {
        validate_image_url(data.image_url.as_deref())?;

        sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name, image_url) VALUES ($1, $2) \
             RETURNING id, name, image_url",
        )
        .bind(&data.name)
        .bind(&data.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<AuthorWithBooks>, ServiceError> {
        let Some(author) =
            sqlx::query_as::<_, Author>("SELECT id, name, image_url FROM authors WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
        else {
            return Ok(None);
        };

        let books = self.books_of(author.id).await?;
        Ok(Some(AuthorWithBooks { author, books }))
    }

    pub async fn get_all(&self) -> Result<Vec<AuthorWithBooks>, ServiceError> {
        let authors =
            sqlx::query_as::<_, Author>("SELECT id, name, image_url FROM authors ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let mut out = Vec::with_capacity(authors.len());
        for author in authors {
            let books = self.books_of(author.id).await?;
            out.push(AuthorWithBooks { author, books });
        }
        Ok(out)
    }

    pub async fn update(&self, id: i32, data: UpdateAuthor) -> Result<AuthorWithBooks, ServiceError> {
        validate_image_url(data.image_url.as_deref())?;

        let current =
            sqlx::query_as::<_, Author>("SELECT id, name, image_url FROM authors WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Author not found".to_string()))?;

        let name = data.name.unwrap_or(current.name);
        let image_url = data.image_url.or(current.image_url);

        let author = sqlx::query_as::<_, Author>(
            "UPDATE authors SET name = $2, image_url = $3 WHERE id = $1 \
             RETURNING id, name, image_url",
        )
        .bind(id)
        .bind(&name)
        .bind(&image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_violation)?;

        let books = self.books_of(author.id).await?;
        Ok(AuthorWithBooks { author, books })
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(constraint_violation)?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Author not found".to_string()));
        }
        Ok(())
    }

    async fn books_of(&self, author_id: i32) -> Result<Vec<Book>, ServiceError> {
        Ok(sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id FROM books WHERE author_id = $1 ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

fn validate_image_url(image_url: Option<&str>) -> Result<(), ServiceError> {
    if let Some(raw) = image_url {
        url::Url::parse(raw)
            .map_err(|_| ServiceError::Validation(format!("invalid imageUrl: {raw}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_must_be_a_url_when_present() {
        assert!(validate_image_url(None).is_ok());
        assert!(validate_image_url(Some("https://example.com/murakami.jpg")).is_ok());
        assert!(matches!(
            validate_image_url(Some("not a url")),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn author_with_books_flattens_author_fields() {
        let payload = AuthorWithBooks {
            author: Author {
                id: 1,
                name: "Franz Kafka".to_string(),
                image_url: None,
            },
            books: vec![],
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Franz Kafka");
        assert_eq!(value["imageUrl"], serde_json::Value::Null);
        assert!(value["books"].as_array().unwrap().is_empty());
    }
}
