//! Wire DTOs shared by the HTTP controllers and the WebSocket channel.
//!
//! Field names are camelCase on the wire; the internal base score is never
//! exposed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::security::{ScanOutcome, SecuritySnapshot, StreamDescriptor};
use crate::domain::security::{
    Alert, AlertCategory, AlertSeverity, Camera, CameraStatus, IntrusionEvent, IntrusionStatus,
    RiskLevel, Severity,
};
use crate::infrastructure::events::SecurityEvent;

/// Error body returned by every failing handler
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    #[schema(example = "CAMERA_NOT_FOUND")]
    pub code: String,
    /// Human-readable error message
    #[schema(example = "Camera not found: cam-ghost")]
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FindingDto {
    pub id: String,
    pub label: String,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionDto {
    pub id: String,
    pub label: String,
    pub description: String,
    pub targets: Vec<String>,
    pub applied: bool,
    pub applied_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionDto {
    pub is_encrypted: bool,
    pub protocol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CameraDto {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: CameraStatus,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub stream_url: String,
    pub rtsp_url: String,
    pub last_activity: String,
    pub encryption: EncryptionDto,
    pub vulnerabilities: Vec<FindingDto>,
    pub protections: Vec<ProtectionDto>,
    pub last_scan: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    pub id: Uuid,
    pub camera_id: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub category: AlertCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntrusionDto {
    pub id: Uuid,
    pub camera_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub status: IntrusionStatus,
}

/// Snapshot returned by `GET /api/security/state`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecurityStateResponse {
    pub cameras: Vec<CameraDto>,
    pub alerts: Vec<AlertDto>,
    pub intrusions: Vec<IntrusionDto>,
    pub overall_risk: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(default)]
    pub camera_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub message: String,
    /// Findings per scanned camera id
    pub findings: HashMap<String, Vec<FindingDto>>,
    pub cameras: Vec<CameraDto>,
    pub overall_risk: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HardeningRequest {
    #[serde(default)]
    pub camera_id: String,
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CameraActionResponse {
    pub message: String,
    pub camera: CameraDto,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCameraRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub stream_url: String,
    #[serde(default)]
    pub rtsp_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Stream descriptor pushed as `camera:stream`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreamDescriptorDto {
    pub camera_id: String,
    pub stream_url: String,
    pub rtsp_url: String,
    pub encryption: EncryptionDto,
    pub timestamp: DateTime<Utc>,
}

impl From<&Camera> for CameraDto {
    fn from(camera: &Camera) -> Self {
        Self {
            id: camera.id.clone(),
            name: camera.name.clone(),
            location: camera.location.clone(),
            status: camera.status,
            risk_level: camera.risk_level,
            risk_score: camera.risk_score,
            stream_url: camera.stream_url.clone(),
            rtsp_url: camera.rtsp_url.clone(),
            last_activity: camera.last_activity.clone(),
            encryption: EncryptionDto {
                is_encrypted: camera.encryption.is_encrypted,
                protocol: camera.encryption.protocol.clone(),
            },
            vulnerabilities: camera.vulnerabilities.iter().map(FindingDto::from).collect(),
            protections: camera
                .protections
                .iter()
                .map(|p| ProtectionDto {
                    id: p.id.clone(),
                    label: p.label.clone(),
                    description: p.description.clone(),
                    targets: p.targets.clone(),
                    applied: p.applied,
                    applied_at: p.applied_at,
                })
                .collect(),
            last_scan: camera.last_scan,
        }
    }
}

impl From<&crate::domain::security::VulnerabilityFinding> for FindingDto {
    fn from(finding: &crate::domain::security::VulnerabilityFinding) -> Self {
        Self {
            id: finding.id.clone(),
            label: finding.label.clone(),
            severity: finding.severity,
            description: finding.description.clone(),
            recommendation: finding.recommendation.clone(),
        }
    }
}

impl From<&Alert> for AlertDto {
    fn from(alert: &Alert) -> Self {
        Self {
            id: alert.id,
            camera_id: alert.camera_id.clone(),
            severity: alert.severity,
            message: alert.message.clone(),
            timestamp: alert.timestamp,
            category: alert.category,
        }
    }
}

impl From<&IntrusionEvent> for IntrusionDto {
    fn from(event: &IntrusionEvent) -> Self {
        Self {
            id: event.id,
            camera_id: event.camera_id.clone(),
            kind: event.kind.clone(),
            severity: event.severity,
            description: event.description.clone(),
            timestamp: event.timestamp,
            status: event.status,
        }
    }
}

impl From<&SecuritySnapshot> for SecurityStateResponse {
    fn from(snapshot: &SecuritySnapshot) -> Self {
        Self {
            cameras: snapshot.cameras.iter().map(CameraDto::from).collect(),
            alerts: snapshot.alerts.iter().map(AlertDto::from).collect(),
            intrusions: snapshot.intrusions.iter().map(IntrusionDto::from).collect(),
            overall_risk: snapshot.overall_risk,
        }
    }
}

impl From<&StreamDescriptor> for StreamDescriptorDto {
    fn from(descriptor: &StreamDescriptor) -> Self {
        Self {
            camera_id: descriptor.camera_id.clone(),
            stream_url: descriptor.stream_url.clone(),
            rtsp_url: descriptor.rtsp_url.clone(),
            encryption: EncryptionDto {
                is_encrypted: descriptor.encryption.is_encrypted,
                protocol: descriptor.encryption.protocol.clone(),
            },
            timestamp: descriptor.timestamp,
        }
    }
}

impl ScanResponse {
    pub fn from_outcome(outcome: &ScanOutcome, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            findings: outcome
                .findings
                .iter()
                .map(|(id, vulns)| (id.clone(), vulns.iter().map(FindingDto::from).collect()))
                .collect(),
            cameras: outcome.cameras.iter().map(CameraDto::from).collect(),
            overall_risk: outcome.overall_risk,
        }
    }
}

/// A `{"event", "data"}` frame on the WebSocket channel
#[derive(Debug, Serialize, Deserialize)]
pub struct WsFrame {
    pub event: String,
    pub data: serde_json::Value,
}

impl WsFrame {
    pub fn new(event: &str, data: impl Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event: event.to_string(),
            data: serde_json::to_value(data)?,
        })
    }

    /// Wire frame for a registry mutation. Created cameras go out as
    /// `camera:update` like any other camera change.
    pub fn from_event(event: &SecurityEvent) -> Result<Self, serde_json::Error> {
        match event {
            SecurityEvent::CameraUpdated(camera) | SecurityEvent::CameraCreated(camera) => {
                Self::new("camera:update", CameraDto::from(camera))
            }
            SecurityEvent::AlertRaised(alert) => Self::new("alert:new", AlertDto::from(alert)),
            SecurityEvent::IntrusionDetected(intrusion) => {
                Self::new("intrusion:new", IntrusionDto::from(intrusion))
            }
            SecurityEvent::RiskUpdated(risk) => Self::new("risk:update", risk),
        }
    }
}
