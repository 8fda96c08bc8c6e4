pub mod auth;
pub mod authors;
pub mod blog_post_thought_bubbles;
pub mod blog_posts;
pub mod book_thought_bubbles;
pub mod books;
pub mod health;
pub mod quotes;
pub mod reviews;
