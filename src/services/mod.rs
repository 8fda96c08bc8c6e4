pub mod author_service;
pub mod blog_post_service;
pub mod blog_post_thought_bubble_service;
pub mod book_service;
pub mod book_thought_bubble_service;
pub mod quote_service;
pub mod review_service;

pub use author_service::AuthorService;
pub use blog_post_service::BlogPostService;
pub use blog_post_thought_bubble_service::BlogPostThoughtBubbleService;
pub use book_service::BookService;
pub use book_thought_bubble_service::BookThoughtBubbleService;
pub use quote_service::QuoteService;
pub use review_service::ReviewService;

use thiserror::Error;

/// Failure kinds for the entity services, tagged so the HTTP layer can
/// pattern-match instead of string-matching messages.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Constraint failures (bad foreign keys, null violations) are client
/// mistakes, not server faults; everything else stays a database error.
pub(crate) fn constraint_violation(err: sqlx::Error) -> ServiceError {
    match &err {
        sqlx::Error::Database(db)
            if matches!(
                db.code().as_deref(),
                Some("23502") | Some("23503") | Some("23505")
            ) =>
        {
            ServiceError::Validation(db.message().to_string())
        }
        _ => ServiceError::Database(err),
    }
}
