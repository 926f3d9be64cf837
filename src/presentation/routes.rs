//! Route definitions and router assembly

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::auth::{LoginUseCase, SignupUseCase, ValidateTokenUseCase};
use crate::application::security::SecurityService;
use crate::config::Config;
use crate::infrastructure::events::BroadcastPublisher;
use crate::presentation::{
    auth::{
        AuthAppState, AuthState,
        controller::{login, logout, signup},
    },
    controllers::{
        health::health,
        security::{apply_hardening, create_camera, get_state, run_scan},
    },
    ws::{WsState, ws_upgrade},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Everything the router needs; assembled once in `create_app`
#[derive(Clone)]
pub struct AppState {
    pub security_service: Arc<SecurityService>,
    pub events: Arc<BroadcastPublisher>,
    pub signup_use_case: Arc<SignupUseCase>,
    pub login_use_case: Arc<LoginUseCase>,
    pub validate_token_use_case: Arc<ValidateTokenUseCase>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::auth::controller::signup,
        crate::presentation::auth::controller::login,
        crate::presentation::auth::controller::logout,
        crate::presentation::controllers::security::get_state,
        crate::presentation::controllers::security::run_scan,
        crate::presentation::controllers::security::apply_hardening,
        crate::presentation::controllers::security::create_camera,
        crate::presentation::controllers::health::health
    ),
    components(
        schemas(
            crate::presentation::models::ErrorResponse,
            crate::presentation::models::CameraDto,
            crate::presentation::models::FindingDto,
            crate::presentation::models::ProtectionDto,
            crate::presentation::models::EncryptionDto,
            crate::presentation::models::AlertDto,
            crate::presentation::models::IntrusionDto,
            crate::presentation::models::SecurityStateResponse,
            crate::presentation::models::ScanRequest,
            crate::presentation::models::ScanResponse,
            crate::presentation::models::HardeningRequest,
            crate::presentation::models::CameraActionResponse,
            crate::presentation::models::CreateCameraRequest,
            crate::presentation::models::HealthResponse,
            crate::presentation::models::StreamDescriptorDto,
            crate::presentation::auth::models::SignupRequest,
            crate::presentation::auth::models::LoginRequest,
            crate::presentation::auth::models::SessionResponse,
            crate::presentation::auth::models::LogoutResponse
        )
    ),
    tags(
        (name = "auth", description = "Session authentication endpoints"),
        (name = "security", description = "Camera registry, scanning and hardening endpoints"),
        (name = "health", description = "Service health endpoint")
    ),
    info(
        title = "Camguard API",
        version = "1.0.0",
        description = "Camera security monitoring backend: registry snapshots, vulnerability scans, hardening actions and a real-time WebSocket channel."
    )
)]
pub struct ApiDoc;

/// Middleware to inject AuthState into request extensions so the
/// `SessionUser` extractor works on every protected route
async fn inject_auth_state_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().insert(auth_state);
    next.run(request).await
}

/// Create the application router
pub fn create_router(app_state: AppState, config: &Config) -> Router {
    let auth_app_state = AuthAppState {
        signup_use_case: app_state.signup_use_case.clone(),
        login_use_case: app_state.login_use_case.clone(),
        token_ttl_hours: config.auth.token_ttl_hours,
        secure_cookies: config.auth.secure_cookies,
    };
    let auth_state = AuthState {
        validate_token: app_state.validate_token_use_case.clone(),
    };
    let ws_state = WsState {
        service: app_state.security_service.clone(),
        events: app_state.events.clone(),
    };

    let auth_routes = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .with_state(auth_app_state);

    let security_routes = Router::new()
        .route("/api/security/state", get(get_state))
        .route("/api/security/scan", post(run_scan))
        .route("/api/security/hardening", post(apply_hardening))
        .route("/api/security/cameras", post(create_camera))
        .with_state(app_state.security_service.clone());

    let health_routes = Router::new().route("/api/health", get(health));

    // Cookie sessions require credentialed CORS, which rules out a literal
    // wildcard origin. "*" in config therefore mirrors the request origin.
    let cors_layer =
        if config.server.allowed_origins.len() == 1 && config.server.allowed_origins[0] == "*" {
            CorsLayer::new()
                .allow_origin(tower_http::cors::AllowOrigin::mirror_request())
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
                .allow_credentials(true)
                .max_age(Duration::from_secs(3600))
        } else {
            let origins: Vec<axum::http::HeaderValue> = config
                .server
                .allowed_origins
                .iter()
                .filter_map(|origin| match axum::http::HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin, "invalid CORS origin in config; skipping");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
                .allow_credentials(true)
                .max_age(Duration::from_secs(3600))
        };

    // The request timeout is applied before the WebSocket route is merged;
    // a timeout on the upgrade would cut long-lived connections.
    let mut router = Router::new()
        .merge(auth_routes)
        .merge(security_routes)
        .merge(health_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .merge(
            Router::new()
                .route("/api/security/ws", get(ws_upgrade))
                .with_state(ws_state),
        );

    // Swagger UI is opt-in so production deployments can keep docs private
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(middleware::from_fn_with_state(
            auth_state,
            inject_auth_state_middleware,
        ));

    router.layer(service_builder)
}
