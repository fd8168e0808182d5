//! Integration tests for the catalog and tone endpoints.

mod common;

use axum::http::StatusCode;
use common::{expect_json, get};

#[tokio::test]
async fn frameworks_list_both_step_sets_and_types() {
    let json = expect_json(
        get(common::default_app(), "/api/v1/frameworks").await,
        StatusCode::OK,
    )
    .await;
    let data = &json["data"];

    let care: Vec<_> = data["care"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["letter"].as_str().unwrap())
        .collect();
    assert_eq!(care, vec!["C", "A", "R", "E"]);

    let clear: Vec<_> = data["clear"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        clear,
        vec!["Context", "Listen First", "Expectations", "Agreements", "Revisit"]
    );

    let types = data["conversationTypes"].as_array().unwrap();
    assert_eq!(types.len(), 5);
    assert_eq!(types[1]["id"], "parent");
    assert_eq!(types[1]["label"], "Parent Complaint");
}

#[tokio::test]
async fn scenarios_never_expose_personas() {
    let json = expect_json(
        get(common::default_app(), "/api/v1/scenarios").await,
        StatusCode::OK,
    )
    .await;
    let scenarios = json["data"].as_array().unwrap();
    assert_eq!(scenarios.len(), 5);
    assert_eq!(scenarios[1]["title"], "Grade Dispute");
    assert_eq!(scenarios[1]["type"], "parent");

    let text = json.to_string();
    assert!(!text.contains("hiddenContext"));
    assert!(!text.contains("divorce"));
}

#[tokio::test]
async fn tone_classifies_at_the_boundaries() {
    let cases = [
        ("warmth=50&structure=50", "Demanding (Ideal)"),
        ("warmth=49&structure=50", "Dominating"),
        ("warmth=50&structure=49", "Enabling"),
        ("warmth=0&structure=0", "Neglecting"),
        ("warmth=80&structure=30", "Enabling"),
    ];
    for (query, label) in cases {
        let json = expect_json(
            get(common::default_app(), &format!("/api/v1/tone?{query}")).await,
            StatusCode::OK,
        )
        .await;
        assert_eq!(json["data"]["label"], label, "query {query}");
    }
}

#[tokio::test]
async fn tone_clamps_and_defaults_inputs() {
    let json = expect_json(
        get(common::default_app(), "/api/v1/tone?warmth=-20&structure=400").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["label"], "Dominating");
    assert_eq!(json["data"]["color"], "#C65D4A");

    let json = expect_json(get(common::default_app(), "/api/v1/tone").await, StatusCode::OK).await;
    assert_eq!(json["data"]["label"], "Demanding (Ideal)");
}
