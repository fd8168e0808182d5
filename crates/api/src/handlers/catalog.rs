//! Read-only catalog and tone endpoints.

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use clearcare_core::framework::{
    conversation_types, ConversationTypeInfo, FrameworkStep, Scenario, CARE_STEPS, CLEAR_STEPS,
    SCENARIOS,
};
use clearcare_core::tone::{classify, ToneClassification, ToneLevel};

use crate::response::DataResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworksPayload {
    pub care: &'static [FrameworkStep],
    pub clear: &'static [FrameworkStep],
    pub conversation_types: Vec<ConversationTypeInfo>,
}

/// GET /frameworks
pub async fn frameworks() -> Json<DataResponse<FrameworksPayload>> {
    Json(DataResponse {
        data: FrameworksPayload {
            care: &CARE_STEPS,
            clear: &CLEAR_STEPS,
            conversation_types: conversation_types(),
        },
    })
}

/// GET /scenarios
///
/// Personas stay server-side.
pub async fn scenarios() -> Json<DataResponse<&'static [Scenario]>> {
    Json(DataResponse { data: &SCENARIOS })
}

/// Slider values; missing ones take the draft default.
#[derive(Debug, Deserialize)]
pub struct ToneParams {
    pub warmth: Option<i64>,
    pub structure: Option<i64>,
}

/// GET /tone?warmth=&structure=
pub async fn tone(Query(params): Query<ToneParams>) -> Json<DataResponse<ToneClassification>> {
    let warmth = params.warmth.map(ToneLevel::new).unwrap_or_default();
    let structure = params.structure.map(ToneLevel::new).unwrap_or_default();
    Json(DataResponse {
        data: classify(warmth, structure),
    })
}
