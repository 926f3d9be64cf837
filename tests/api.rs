//! End-to-end API tests exercising the full router: session auth with the
//! cookie flow, the protected security endpoints, and error mapping.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use camguard::config::{AuthConfig, Config, ServerConfig, SimulationConfig};
use camguard::create_app;

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            enable_docs: false,
            ..ServerConfig::default()
        },
        auth: AuthConfig {
            jwt_secret: "test-secret-key-for-testing-only-32chars".to_string(),
            ..AuthConfig::default()
        },
        simulation: SimulationConfig {
            enabled: false,
            rng_seed: Some(42),
            ..SimulationConfig::default()
        },
        ..Config::default()
    }
}

fn test_app() -> Router {
    create_app(&test_config()).router
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    request
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Session cookie pair (`cameraJWT=<token>`) from a Set-Cookie header
fn session_cookie(response: &axum::response::Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header present")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("cameraJWT="));
    set_cookie.split(';').next().unwrap().to_string()
}

/// Sign up a fresh admin and return the session cookie
async fn signup(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/signup",
            json!({"username": "admin", "email": email, "password": "hunter2hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    session_cookie(&response)
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app();
    let response = app.oneshot(get("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn signup_sets_session_cookie() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            json!({"username": "admin", "email": "a@example.com", "password": "hunter2hunter2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("cameraJWT="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));

    let body = body_json(response).await;
    assert_eq!(body["message"], "Admin Registered Successfully");
    assert_eq!(body["email"], "a@example.com");
    assert_eq!(body["username"], "admin");
}

#[tokio::test]
async fn signup_with_missing_fields_is_rejected() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            json!({"username": "", "email": "a@example.com", "password": "hunter2hunter2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let app = test_app();
    signup(&app, "a@example.com").await;

    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            json!({"username": "other", "email": "a@example.com", "password": "hunter2hunter2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Already Registered");
}

#[tokio::test]
async fn login_round_trip() {
    let app = test_app();
    signup(&app, "a@example.com").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"email": "a@example.com", "password": "hunter2hunter2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Logged IN successfully");

    // Cookie from login opens the protected surface
    let response = app
        .oneshot(with_cookie(get("/api/security/state"), &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = test_app();
    signup(&app, "a@example.com").await;

    for body in [
        json!({"email": "nobody@example.com", "password": "hunter2hunter2"}),
        json!({"email": "a@example.com", "password": "wrong-password"}),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/auth/login", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid Credentials");
    }
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(post_json("/api/auth/logout", json!({})), &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("cameraJWT=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn state_requires_a_session() {
    let app = test_app();
    let response = app.oneshot(get("/api/security/state")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Unauthorized: No token provided");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = test_app();
    let response = app
        .oneshot(with_cookie(
            get("/api/security/state"),
            "cameraJWT=not-a-token",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Unauthorized: Invalid token");
}

#[tokio::test]
async fn state_returns_the_seed_estate() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(get("/api/security/state"), &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let cameras = body["cameras"].as_array().unwrap();
    assert_eq!(cameras.len(), 4);
    assert_eq!(cameras[0]["id"], "cam-entrance");
    // Internal scoring inputs never appear on the wire
    assert!(cameras[0].get("baseScore").is_none());
    assert!(cameras[0]["riskScore"].as_u64().is_some());

    assert_eq!(body["alerts"].as_array().unwrap().len(), 2);
    assert_eq!(body["intrusions"].as_array().unwrap().len(), 1);
    let risk = body["overallRisk"].as_u64().unwrap();
    assert!((5..=95).contains(&risk));
}

#[tokio::test]
async fn fleet_scan_covers_every_camera() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(
            post_json("/api/security/scan", json!({})),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Full estate scan completed");
    assert_eq!(body["findings"].as_object().unwrap().len(), 4);
    assert_eq!(body["cameras"].as_array().unwrap().len(), 4);
    for camera in body["cameras"].as_array().unwrap() {
        assert!(camera["lastScan"].is_string());
    }
}

#[tokio::test]
async fn blank_camera_id_scans_the_whole_estate() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(
            post_json("/api/security/scan", json!({ "cameraId": "" })),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Full estate scan completed");
    assert_eq!(body["findings"].as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn single_camera_scan_touches_only_that_camera() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(
            post_json("/api/security/scan", json!({"cameraId": "cam-lobby"})),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Camera scan completed");
    let findings = body["findings"].as_object().unwrap();
    assert_eq!(findings.len(), 1);
    assert!(findings.contains_key("cam-lobby"));
}

#[tokio::test]
async fn scanning_an_unknown_camera_is_404() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(
            post_json("/api/security/scan", json!({"cameraId": "cam-ghost"})),
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "CAMERA_NOT_FOUND");
}

#[tokio::test]
async fn hardening_applies_and_reports_the_action() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(
            post_json(
                "/api/security/hardening",
                json!({"cameraId": "cam-entrance", "action": "strong-password"}),
            ),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Security hardening applied");
    let protections = body["camera"]["protections"].as_array().unwrap();
    let applied = protections
        .iter()
        .find(|p| p["id"] == "strong-password")
        .unwrap();
    assert_eq!(applied["applied"], true);
    assert!(applied["appliedAt"].is_string());

    // Targeted findings are gone after the action
    let vulns = body["camera"]["vulnerabilities"].as_array().unwrap();
    assert!(vulns.iter().all(|v| v["id"] != "weak-password"));
}

#[tokio::test]
async fn unknown_hardening_action_is_400() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(
            post_json(
                "/api/security/hardening",
                json!({"cameraId": "cam-entrance", "action": "format-disk"}),
            ),
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNKNOWN_ACTION");
}

#[tokio::test]
async fn hardening_requires_both_fields() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(
            post_json("/api/security/hardening", json!({"cameraId": "cam-entrance"})),
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "cameraId and action are required");
}

#[tokio::test]
async fn hardening_an_unknown_camera_is_404() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(
            post_json(
                "/api/security/hardening",
                json!({"cameraId": "cam-ghost", "action": "strong-password"}),
            ),
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn camera_registration_fills_rtsp_default() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .clone()
        .oneshot(with_cookie(
            post_json(
                "/api/security/cameras",
                json!({
                    "name": "Back Alley",
                    "location": "North Wall",
                    "streamUrl": "https://cams.example.com/back-alley"
                }),
            ),
            &cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let camera = &body["camera"];
    assert_eq!(camera["name"], "Back Alley");
    assert_eq!(camera["rtspUrl"], "rtsp://virtual/back-alley");
    // Random findings decide whether the camera starts online or alerting
    let status = camera["status"].as_str().unwrap();
    assert!(status == "online" || status == "alert");

    // The registry now reports five cameras
    let response = app
        .oneshot(with_cookie(get("/api/security/state"), &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["cameras"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn camera_registration_requires_all_fields() {
    let app = test_app();
    let cookie = signup(&app, "a@example.com").await;

    let response = app
        .oneshot(with_cookie(
            post_json(
                "/api/security/cameras",
                json!({"name": "Back Alley", "location": ""}),
            ),
            &cookie,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
