/*
 * Responsibility
 * - the URL layout: /, /health, /test, /ideas, /ideas/{idea_id}/...
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    comments::{create_comment, list_comments},
    health::{health, root, store_check},
    ideas::{create_idea, list_ideas, upvote_idea},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/test", get(store_check))
        .route("/ideas", get(list_ideas).post(create_idea))
        .route("/ideas/{idea_id}/upvote", post(upvote_idea))
        .route(
            "/ideas/{idea_id}/comments",
            get(list_comments).post(create_comment),
        )
}
