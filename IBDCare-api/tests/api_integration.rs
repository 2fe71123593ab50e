use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use ibd_care_api::api::routes::create_app;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not valid JSON")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

fn journal_entry_body(user_id: &str, pain: u8) -> Value {
    json!({
        "user_id": user_id,
        "blood_present": false,
        "mucus_present": false,
        "pain_severity": pain,
        "urgency_level": 2,
        "bowel_frequency": 2,
        "bristol_scale": 4,
        "stress_level": 3,
        "fatigue_level": 2,
        "sleep_quality": 8
    })
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = create_app().await;

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["components"]["storage"]["status"], "ok");
}

#[tokio::test]
async fn journal_entry_roundtrip() {
    let app = create_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/journal",
            journal_entry_body("user-1", 3),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["user_id"], "user-1");
    assert_eq!(created["pain_severity"], 3);

    let response = app
        .oneshot(get_request("/api/v1/journal?user_id=user-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let history = body_json(response).await;
    assert_eq!(history["total_count"], 1);
    assert_eq!(history["data"][0]["user_id"], "user-1");
}

#[tokio::test]
async fn out_of_range_journal_entry_is_rejected() {
    let app = create_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/journal",
            journal_entry_body("user-1", 15),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn assessment_with_no_data_reports_remission() {
    let app = create_app().await;

    let response = app
        .oneshot(get_request(
            "/api/v1/journal/assessment?user_id=user-1&timeframe=30",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["activity"], "remission");
    assert_eq!(body["entry_count"], 0);
    assert_eq!(body["targets"]["adherence"]["target"], 90.0);
}

#[tokio::test]
async fn adherence_report_covers_scheduled_medication() {
    let app = create_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/medications/schedule",
            json!({
                "user_id": "user-1",
                "medication_name": "Mesalamine",
                "frequency": { "type": "daily" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/medications/intake",
            json!({
                "user_id": "user-1",
                "medication_name": "Mesalamine",
                "dosage": "50mg"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get_request("/api/v1/medications/adherence?user_id=user-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    assert!(report["adherence_results"]["Mesalamine"].is_object());
    assert_eq!(report["adherence_results"]["Mesalamine"]["actual_doses"], 1);
}

#[tokio::test]
async fn invalid_adherence_dates_are_rejected() {
    let app = create_app().await;

    let response = app
        .oneshot(get_request(
            "/api/v1/medications/adherence?user_id=user-1&start_date=yesterday",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn diagnosis_roundtrip() {
    let app = create_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/journal/diagnosis?user_id=user-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/journal/diagnosis",
            json!({
                "user_id": "user-1",
                "disease_type": "Crohn's disease",
                "severity": "Moderate"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/api/v1/journal/diagnosis?user_id=user-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["severity"], "Moderate");
}
