//! Mounted at `/conversations` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::conversations;
use crate::state::AppState;

/// ```text
/// GET    /        -> list_conversations (?q)
/// POST   /        -> create_conversation
/// GET    /{id}    -> get_conversation
/// PATCH  /{id}    -> update_conversation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(conversations::list_conversations).post(conversations::create_conversation),
        )
        .route(
            "/{id}",
            get(conversations::get_conversation).patch(conversations::update_conversation),
        )
}
