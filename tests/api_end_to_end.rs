// End-to-end: generate a corpus, train on it, then drive the HTTP
// router in-process the way a client would.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tempfile::tempdir;
use tower::ServiceExt;

use ticket_classifier::application::train_use_case::{TrainConfig, TrainUseCase};
use ticket_classifier::data::generator;
use ticket_classifier::server::{router, state::AppState};
use ticket_classifier::AppConfig;

const LOGIN_TICKET: &str = r#"{"text":"No puedo iniciar sesión con mi contraseña"}"#;

async fn call(state: Arc<AppState>, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn predict_request(body: &str) -> Request<Body> {
    Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn unloaded_service_returns_503_until_trained() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data/raw/tickets.csv");
    let config = AppConfig {
        data_path:    data.clone(),
        model_path:   dir.path().join("models/ticket_model.bin"),
        metrics_path: dir.path().join("models/metrics.json"),
        port:         0,
    };

    // ── Before training: Unloaded ────────────────────────────────────────────
    let state = Arc::new(AppState::load(config.clone()).unwrap());
    let (status, body) = call(state.clone(), predict_request(LOGIN_TICKET)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], "Model not loaded. Run: ticket-classifier train");

    let (status, body) = call(state, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    // ── Train on a generated corpus ──────────────────────────────────────────
    generator::write_corpus(&data, 20, generator::DEFAULT_SEED).unwrap();
    let metrics = TrainUseCase::new(TrainConfig { max_iter: 300, ..TrainConfig::default() })
        .train_and_save(&config.data_path, &config.model_path, &config.metrics_path)
        .unwrap();
    assert_eq!(metrics.n_train + metrics.n_test, 120);

    // ── Fresh state picks up the artifact ────────────────────────────────────
    let state = Arc::new(AppState::load(config).unwrap());
    let (status, body) = call(state.clone(), predict_request(LOGIN_TICKET)).await;
    assert_eq!(status, StatusCode::OK);
    let label = body["label"].as_str().unwrap();
    assert!(generator::labels().iter().any(|l| *l == label));
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));

    let req = Request::get("/model-info").body(Body::empty()).unwrap();
    let (status, body) = call(state, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loaded"], true);
    assert_eq!(body["metrics"]["n_test"], metrics.n_test);
    let accuracy = body["metrics"]["accuracy"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
}

#[tokio::test]
async fn empty_text_is_rejected_before_the_model_is_consulted() {
    let dir = tempdir().unwrap();
    let config = AppConfig::with_artifacts(dir.path().join("m.bin"), dir.path().join("m.json"));
    let state = Arc::new(AppState::load(config).unwrap());

    let (status, body) = call(state, predict_request(r#"{"text":""}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}
