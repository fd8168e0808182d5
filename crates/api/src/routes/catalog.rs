use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Static framework catalog and tone calibration.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/frameworks", get(catalog::frameworks))
        .route("/scenarios", get(catalog::scenarios))
        .route("/tone", get(catalog::tone))
}
