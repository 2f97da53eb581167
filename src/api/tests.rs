use super::*;
use crate::models::inference::PredictionInvoker;
use crate::models::mock::{FailingClassifier, LookupClassifier, PanickingClassifier};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use tower::util::ServiceExt;

const DATASET: &str = "\
Gender Haircut,Hair Length,Face Shape,Hair Type,Hair Density,Recommended Haircut
Male,Short,Oval,Straight,Thin,Crew Cut
Female,Long,Heart,Wavy,Thick,Layered Cut
Male,Medium,Square,Curly,Medium,Pompadour
";

fn catalog() -> AttributeCatalog {
    AttributeCatalog::from_reader(DATASET.as_bytes()).expect("test")
}

fn state_with(invoker: PredictionInvoker) -> AppState {
    AppState::new(catalog(), PredictionPipeline::new(invoker))
}

fn loaded_state() -> AppState {
    state_with(PredictionInvoker::new(Arc::new(LookupClassifier::new())))
}

fn valid_body() -> Value {
    json!({
        "features": {
            "Gender Haircut": "Male",
            "Hair Length": "Short",
            "Face Shape": "Oval",
            "Hair Type": "Straight",
            "Hair Density": "Thin"
        }
    })
}

async fn post_predict(state: AppState, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("test");

    let response = create_router(state).oneshot(request).await.expect("test");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("test");
    (status, serde_json::from_slice(&bytes).expect("test"))
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).expect("test");
    let response = create_router(state).oneshot(request).await.expect("test");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("test");
    (status, serde_json::from_slice(&bytes).expect("test"))
}

#[tokio::test]
async fn test_predict_success() {
    let (status, body) = post_predict(loaded_state(), valid_body().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"prediction": "Crew Cut"}));
}

#[tokio::test]
async fn test_predict_is_idempotent() {
    let state = loaded_state();
    let mut body = valid_body();
    body["features"]["Gender Haircut"] = json!("Female");

    let first = post_predict(state.clone(), body.to_string()).await;
    let second = post_predict(state, body.to_string()).await;

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_predict_ignores_extra_features() {
    let mut body = valid_body();
    body["features"]["Beard"] = json!("Full");

    let (status, _) = post_predict(loaded_state(), body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_feature_is_bad_request() {
    let mut body = valid_body();
    body["features"]
        .as_object_mut()
        .expect("test")
        .remove("Hair Type");

    let (status, body) = post_predict(loaded_state(), body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing feature: Hair Type"}));
}

#[tokio::test]
async fn test_unknown_category_is_an_error() {
    let mut body = valid_body();
    body["features"]["Hair Length"] = json!("Unknown");

    let (status, body) = post_predict(loaded_state(), body.to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().expect("test");
    assert!(message.contains("Unknown"));
    assert!(body.get("prediction").is_none());
}

#[tokio::test]
async fn test_model_not_loaded() {
    let state = state_with(PredictionInvoker::unavailable());

    let (status, body) = post_predict(state.clone(), valid_body().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Model not loaded"}));

    // Lookups keep working without a model
    let (status, body) = get_json(state, "/hairType").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"hairTypeList": ["Curly", "Straight", "Wavy"]}));
}

#[tokio::test]
async fn test_model_not_loaded_takes_precedence_over_bad_body() {
    let state = state_with(PredictionInvoker::unavailable());

    let (status, body) = post_predict(state, "not json".to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Model not loaded"}));
}

#[tokio::test]
async fn test_malformed_body() {
    let (status, body) = post_predict(loaded_state(), "{\"feature\": {}}".to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .expect("test")
        .starts_with("Malformed request"));
}

#[tokio::test]
async fn test_model_failure_is_reported() {
    let state = state_with(PredictionInvoker::new(Arc::new(FailingClassifier::new(
        "expected 5 columns",
    ))));

    let (status, body) = post_predict(state.clone(), valid_body().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "expected 5 columns"}));
    assert_eq!(state.metrics().predictions_failed.load(Ordering::Relaxed), 1);
    assert_eq!(
        state
            .metrics()
            .get_failures_by_kind()
            .get("prediction_error"),
        Some(&1)
    );
}

#[tokio::test]
async fn test_lookup_routes() {
    let state = loaded_state();

    let expected = [
        ("/genderHaircut", "genderHaircutList", json!(["Female", "Male"])),
        ("/hairLength", "hairLengthList", json!(["Long", "Medium", "Short"])),
        ("/faceShape", "faceShapeList", json!(["Heart", "Oval", "Square"])),
        ("/hairType", "hairTypeList", json!(["Curly", "Straight", "Wavy"])),
        ("/hairDensity", "hairDensityList", json!(["Medium", "Thick", "Thin"])),
    ];

    for (uri, key, values) in expected {
        let (status, body) = get_json(state.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!({ key: values }), "{}", uri);
    }
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(state_with(PredictionInvoker::unavailable()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["model"], Value::Null);
}

#[tokio::test]
async fn test_health_names_loaded_model() {
    let (status, body) = get_json(loaded_state(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model"], "lookup");
}

#[tokio::test]
async fn test_model_panic_is_contained() {
    let state = state_with(PredictionInvoker::new(Arc::new(PanickingClassifier)));

    let (status, body) = post_predict(state.clone(), valid_body().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .expect("test")
        .starts_with("Prediction task failed"));

    // The service keeps answering after the panic
    let (status, _) = post_predict(state.clone(), valid_body().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _) = get_json(state.clone(), "/hairType").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(state.metrics().predictions_failed.load(Ordering::Relaxed), 2);
}

#[tokio::test]
async fn test_metrics_count_successes() {
    let state = loaded_state();
    post_predict(state.clone(), valid_body().to_string()).await;
    post_predict(state.clone(), valid_body().to_string()).await;

    assert_eq!(state.metrics().predictions_served.load(Ordering::Relaxed), 2);
    assert_eq!(
        state.metrics().get_label_distribution().get("Crew Cut"),
        Some(&2)
    );
}
