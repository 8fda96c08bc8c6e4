use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{AuthService, PgCredentialStore, TokenCodec};
use crate::config::{AppConfig, AuthStatusPolicy};
use crate::services::{
    AuthorService, BlogPostService, BlogPostThoughtBubbleService, BookService,
    BookThoughtBubbleService, QuoteService, ReviewService,
};

/// Per-process shared state handed to every handler. Construction is the
/// only place services learn about the pool; nothing is global.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth: AuthService,
    pub status_policy: AuthStatusPolicy,
    pub authors: AuthorService,
    pub books: BookService,
    pub reviews: ReviewService,
    pub blog_posts: BlogPostService,
    pub quotes: QuoteService,
    pub book_thought_bubbles: BookThoughtBubbleService,
    pub blog_post_thought_bubbles: BlogPostThoughtBubbleService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        let codec = TokenCodec::new(
            &config.security.jwt_secret,
            config.security.token_ttl_secs,
        );
        let store = Arc::new(PgCredentialStore::new(pool.clone()));
        let auth = AuthService::new(store, codec).with_cost(config.security.bcrypt_cost);

        Self {
            auth,
            status_policy: config.security.status_policy,
            authors: AuthorService::new(pool.clone()),
            books: BookService::new(pool.clone()),
            reviews: ReviewService::new(pool.clone()),
            blog_posts: BlogPostService::new(pool.clone()),
            quotes: QuoteService::new(pool.clone()),
            book_thought_bubbles: BookThoughtBubbleService::new(pool.clone()),
            blog_post_thought_bubbles: BlogPostThoughtBubbleService::new(pool.clone()),
            pool,
        }
    }
}
