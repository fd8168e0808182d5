//! Shared response envelope for API handlers.
//!
//! Record and catalog endpoints wrap their payload as `{ "data": ... }`.
//! The two coaching endpoints keep their flat `{starter}` / `{response}`
//! bodies.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
