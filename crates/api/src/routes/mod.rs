pub mod catalog;
pub mod coaching;
pub mod conversations;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST   /generate-starter                 opener for a draft
/// POST   /practice-chat                    next persona reply
///
/// GET    /conversations                    list (?q)
/// POST   /conversations                    create from draft
/// GET    /conversations/{id}               get
/// PATCH  /conversations/{id}               partial update
///
/// GET    /frameworks                       CARE/CLEAR steps and types
/// GET    /scenarios                        practice scenarios
/// GET    /tone                             classify (?warmth, structure)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(coaching::router())
        .nest("/conversations", conversations::router())
        .merge(catalog::router())
}
