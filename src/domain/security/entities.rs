//! Security domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{
    AlertCategory, AlertSeverity, CameraStatus, IntrusionStatus, RiskLevel, Severity,
};

/// A weakness a camera can exhibit, drawn immutably from the fixed catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityFinding {
    pub id: String,
    pub label: String,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

/// Per-camera state of one hardening action from the protection catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionState {
    pub id: String,
    pub label: String,
    pub description: String,
    /// Vulnerability ids this protection neutralizes when applied
    pub targets: Vec<String>,
    pub applied: bool,
    pub applied_at: Option<DateTime<Utc>>,
}

/// Stream encryption metadata reported alongside stream descriptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionInfo {
    pub is_encrypted: bool,
    pub protocol: String,
}

impl Default for EncryptionInfo {
    fn default() -> Self {
        Self {
            is_encrypted: true,
            protocol: "TLS 1.3".to_string(),
        }
    }
}

/// A simulated video source tracked by the registry.
///
/// Created at process start (seed cameras) or through registration; mutated
/// in place by scans, hardening, and the simulation workers; never deleted.
#[derive(Debug, Clone)]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: CameraStatus,
    pub risk_level: RiskLevel,
    /// Derived score, always clamped to [5, 95]
    pub risk_score: u32,
    /// Fixed random baseline assigned once at creation (25.0..60.0)
    pub base_score: f64,
    pub stream_url: String,
    pub rtsp_url: String,
    pub last_activity: String,
    pub encryption: EncryptionInfo,
    pub vulnerabilities: Vec<VulnerabilityFinding>,
    /// One entry per catalog protection, all unapplied at creation
    pub protections: Vec<ProtectionState>,
    pub created_at: DateTime<Utc>,
    pub last_scan: Option<DateTime<Utc>>,
}

impl Camera {
    pub fn protection_mut(&mut self, action: &str) -> Option<&mut ProtectionState> {
        self.protections.iter_mut().find(|p| p.id == action)
    }

    pub fn applied_protection_count(&self) -> usize {
        self.protections.iter().filter(|p| p.applied).count()
    }
}

/// An entry in the capped alert log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub camera_id: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub category: AlertCategory,
}

/// A synthesized intrusion record in the capped intrusion log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrusionEvent {
    pub id: Uuid,
    pub camera_id: String,
    pub kind: String,
    pub severity: Severity,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub status: IntrusionStatus,
}
