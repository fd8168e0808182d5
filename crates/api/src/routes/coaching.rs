use axum::routing::post;
use axum::Router;

use crate::handlers::coaching;
use crate::state::AppState;

/// Completion-backed endpoints. Both always answer 200.
///
/// ```text
/// POST /generate-starter  -> generate_starter
/// POST /practice-chat     -> practice_chat
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-starter", post(coaching::generate_starter))
        .route("/practice-chat", post(coaching::practice_chat))
}
