//! Camera security endpoints: registry snapshot, scans, hardening actions
//! and virtual camera registration. Every route requires a valid session.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::application::security::{NewCameraRequest, SecurityService};
use crate::domain::security::SecurityError;
use crate::presentation::auth::SessionUser;
use crate::presentation::models::{
    CameraActionResponse, CameraDto, CreateCameraRequest, ErrorResponse, HardeningRequest,
    ScanRequest, ScanResponse, SecurityStateResponse,
};

type SecurityFailure = (StatusCode, Json<ErrorResponse>);

fn security_error_to_response(error: SecurityError) -> SecurityFailure {
    let (status, code) = match &error {
        SecurityError::CameraNotFound { .. } => (StatusCode::NOT_FOUND, "CAMERA_NOT_FOUND"),
        SecurityError::UnknownAction { .. } => (StatusCode::BAD_REQUEST, "UNKNOWN_ACTION"),
        SecurityError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
    };
    (status, Json(ErrorResponse::new(code, error.to_string())))
}

/// Registry snapshot
#[utoipa::path(
    get,
    path = "/api/security/state",
    tag = "security",
    responses(
        (status = 200, description = "Current cameras, alerts, intrusions and overall risk", body = SecurityStateResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse)
    )
)]
pub async fn get_state(
    _user: SessionUser,
    State(service): State<Arc<SecurityService>>,
) -> Json<SecurityStateResponse> {
    Json(SecurityStateResponse::from(&service.snapshot()))
}

/// Run a vulnerability scan over one camera or the whole fleet
#[utoipa::path(
    post,
    path = "/api/security/scan",
    tag = "security",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scan completed", body = ScanResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 404, description = "Unknown camera id", body = ErrorResponse)
    )
)]
pub async fn run_scan(
    user: SessionUser,
    State(service): State<Arc<SecurityService>>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, SecurityFailure> {
    // A blank id means a full-estate scan, same as omitting the field.
    let camera_id = request
        .camera_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());
    let outcome = service
        .run_scan(camera_id)
        .map_err(security_error_to_response)?;

    tracing::info!(
        user = %user.username,
        scanned = outcome.findings.len(),
        "security scan requested"
    );
    let message = if camera_id.is_some() {
        "Camera scan completed"
    } else {
        "Full estate scan completed"
    };
    Ok(Json(ScanResponse::from_outcome(&outcome, message)))
}

/// Apply a hardening action to a camera
#[utoipa::path(
    post,
    path = "/api/security/hardening",
    tag = "security",
    request_body = HardeningRequest,
    responses(
        (status = 200, description = "Action applied", body = CameraActionResponse),
        (status = 400, description = "Unknown hardening action", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 404, description = "Unknown camera id", body = ErrorResponse)
    )
)]
pub async fn apply_hardening(
    user: SessionUser,
    State(service): State<Arc<SecurityService>>,
    Json(request): Json<HardeningRequest>,
) -> Result<Json<CameraActionResponse>, SecurityFailure> {
    if request.camera_id.trim().is_empty() || request.action.trim().is_empty() {
        return Err(security_error_to_response(SecurityError::validation(
            "cameraId and action are required",
        )));
    }

    let camera = service
        .apply_hardening(&request.camera_id, &request.action)
        .map_err(security_error_to_response)?;

    tracing::info!(
        user = %user.username,
        camera_id = %request.camera_id,
        action = %request.action,
        "hardening action applied"
    );
    Ok(Json(CameraActionResponse {
        message: "Security hardening applied".to_string(),
        camera: CameraDto::from(&camera),
    }))
}

/// Register a virtual camera
#[utoipa::path(
    post,
    path = "/api/security/cameras",
    tag = "security",
    request_body = CreateCameraRequest,
    responses(
        (status = 201, description = "Camera registered", body = CameraActionResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse)
    )
)]
pub async fn create_camera(
    user: SessionUser,
    State(service): State<Arc<SecurityService>>,
    Json(request): Json<CreateCameraRequest>,
) -> Result<(StatusCode, Json<CameraActionResponse>), SecurityFailure> {
    let camera = service
        .register_camera(NewCameraRequest {
            name: request.name,
            location: request.location,
            stream_url: request.stream_url,
            rtsp_url: request.rtsp_url,
        })
        .map_err(security_error_to_response)?;

    tracing::info!(user = %user.username, camera_id = %camera.id, "camera registered");
    Ok((
        StatusCode::CREATED,
        Json(CameraActionResponse {
            message: "Virtual camera created".to_string(),
            camera: CameraDto::from(&camera),
        }),
    ))
}
