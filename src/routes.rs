use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::{require_admin, require_auth};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    // Every entity table is mounted twice: once openly (read/write, as the
    // site itself uses it) and once under /admin behind the access gate.
    // /admin/login is added after the route_layer calls so the gate does not
    // apply to it.
    let admin = Router::new()
        .nest("/authors", author_routes())
        .nest("/books", book_routes())
        .nest("/reviews", review_routes())
        .nest("/blogposts", blog_post_routes())
        .nest("/quotes", quote_routes())
        .nest("/bookthoughtbubbles", book_thought_bubble_routes())
        .nest("/blogpostthoughtbubbles", blog_post_thought_bubble_routes())
        // route_layer runs bottom-up: authenticate first, then the admin check.
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .route("/login", post(handlers::auth::admin_login));

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .nest("/books", book_routes())
        .nest("/reviews", review_routes())
        .nest("/blogposts", blog_post_routes())
        .nest("/authors", author_routes())
        .nest("/quotes", quote_routes())
        .nest("/book-thought-bubbles", book_thought_bubble_routes())
        .nest("/blog-post-thought-bubbles", blog_post_thought_bubble_routes())
        .nest("/admin", admin)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn author_routes() -> Router<AppState> {
    use crate::handlers::authors;
    Router::new()
        .route("/", post(authors::create).get(authors::get_all))
        .route(
            "/:id",
            get(authors::get_by_id)
                .put(authors::update)
                .delete(authors::delete),
        )
}

fn book_routes() -> Router<AppState> {
    use crate::handlers::books;
    Router::new()
        .route("/", post(books::create).get(books::get_all))
        .route(
            "/:id",
            get(books::get_by_id).put(books::update).delete(books::delete),
        )
}

fn review_routes() -> Router<AppState> {
    use crate::handlers::reviews;
    Router::new()
        .route("/", post(reviews::create).get(reviews::get_all))
        .route(
            "/:id",
            get(reviews::get_by_id)
                .put(reviews::update)
                .delete(reviews::delete),
        )
}

fn blog_post_routes() -> Router<AppState> {
    use crate::handlers::blog_posts;
    Router::new()
        .route("/", post(blog_posts::create).get(blog_posts::get_all))
        .route(
            "/:id",
            get(blog_posts::get_by_id)
                .put(blog_posts::update)
                .delete(blog_posts::delete),
        )
}

fn quote_routes() -> Router<AppState> {
    use crate::handlers::quotes;
    Router::new()
        .route("/", post(quotes::create).get(quotes::get_all))
        .route(
            "/:id",
            get(quotes::get_by_id)
                .put(quotes::update)
                .delete(quotes::delete),
        )
}

fn book_thought_bubble_routes() -> Router<AppState> {
    use crate::handlers::book_thought_bubbles as bubbles;
    Router::new()
        .route("/", post(bubbles::create).get(bubbles::get_all))
        .route(
            "/:id",
            get(bubbles::get_by_id)
                .put(bubbles::update)
                .delete(bubbles::delete),
        )
}

fn blog_post_thought_bubble_routes() -> Router<AppState> {
    use crate::handlers::blog_post_thought_bubbles as bubbles;
    Router::new()
        .route("/", post(bubbles::create).get(bubbles::get_all))
        .route(
            "/:id",
            get(bubbles::get_by_id)
                .put(bubbles::update)
                .delete(bubbles::delete),
        )
}
