//! Registry service: the single owner of all camera/alert/intrusion state.
//!
//! Handlers and simulation workers share one `SecurityService` through the
//! axum state; every mutation happens under the internal lock and is pushed
//! to viewers through the injected publisher. There is no module-level
//! state anywhere.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::security::catalog::{
    self, CameraSeed, INTRUSION_TEMPLATES, SEED_CAMERAS,
};
use crate::domain::security::{
    Alert, AlertCategory, AlertSeverity, Camera, CameraStatus, EncryptionInfo, IntrusionEvent,
    IntrusionStatus, RiskLevel, SecurityError, Severity, VulnerabilityFinding,
};
use crate::infrastructure::entropy::EntropySource;
use crate::infrastructure::events::{EventPublisher, SecurityEvent};

use super::risk;

/// Alert and intrusion logs keep only the most recent entries
const MAX_LOG_ENTRIES: usize = 25;

struct RegistryState {
    /// Insertion order preserved; seed cameras first
    cameras: Vec<Camera>,
    /// Newest first
    alerts: VecDeque<Alert>,
    /// Newest first
    intrusions: VecDeque<IntrusionEvent>,
}

/// Full registry snapshot returned by the state endpoint and the WS handshake
#[derive(Debug, Clone)]
pub struct SecuritySnapshot {
    pub cameras: Vec<Camera>,
    pub alerts: Vec<Alert>,
    pub intrusions: Vec<IntrusionEvent>,
    pub overall_risk: u32,
}

/// Result of a vulnerability scan
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Findings per scanned camera id
    pub findings: HashMap<String, Vec<VulnerabilityFinding>>,
    pub cameras: Vec<Camera>,
    pub overall_risk: u32,
}

/// Validated input for camera registration
#[derive(Debug, Clone)]
pub struct NewCameraRequest {
    pub name: String,
    pub location: String,
    pub stream_url: String,
    pub rtsp_url: Option<String>,
}

/// Stream endpoints handed to a viewer on `rtsp:request`
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    pub camera_id: String,
    pub stream_url: String,
    pub rtsp_url: String,
    pub encryption: EncryptionInfo,
    pub timestamp: DateTime<Utc>,
}

pub struct SecurityService {
    state: RwLock<RegistryState>,
    publisher: Arc<dyn EventPublisher>,
    entropy: Arc<dyn EntropySource>,
}

impl SecurityService {
    /// Build the service with the four seed cameras and the seed alert and
    /// intrusion history.
    pub fn new(publisher: Arc<dyn EventPublisher>, entropy: Arc<dyn EntropySource>) -> Self {
        let cameras = SEED_CAMERAS
            .iter()
            .map(|seed| seed_camera(seed, entropy.as_ref()))
            .collect();

        let now = Utc::now();
        let alerts = VecDeque::from(vec![
            Alert {
                id: Uuid::new_v4(),
                camera_id: "cam-server-room".to_string(),
                severity: AlertSeverity::High,
                message: "Unauthorized access detected in Server Room".to_string(),
                timestamp: now - Duration::minutes(3),
                category: AlertCategory::Intrusion,
            },
            Alert {
                id: Uuid::new_v4(),
                camera_id: "cam-parking".to_string(),
                severity: AlertSeverity::Medium,
                message: "Motion detected after hours - Parking".to_string(),
                timestamp: now - Duration::minutes(12),
                category: AlertCategory::Motion,
            },
        ]);
        let intrusions = VecDeque::from(vec![IntrusionEvent {
            id: Uuid::new_v4(),
            camera_id: "cam-entrance".to_string(),
            kind: "brute-force".to_string(),
            severity: Severity::Medium,
            description: "Repeated credential guessing blocked".to_string(),
            timestamp: now - Duration::minutes(5),
            status: IntrusionStatus::Blocked,
        }]);

        Self {
            state: RwLock::new(RegistryState {
                cameras,
                alerts,
                intrusions,
            }),
            publisher,
            entropy,
        }
    }

    /// Full estate snapshot
    pub fn snapshot(&self) -> SecuritySnapshot {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        SecuritySnapshot {
            cameras: state.cameras.clone(),
            alerts: state.alerts.iter().cloned().collect(),
            intrusions: state.intrusions.iter().cloned().collect(),
            overall_risk: risk::overall(&state.cameras),
        }
    }

    /// Replace the vulnerability set of one camera (or the whole estate)
    /// with a fresh random draw from the catalog.
    pub fn run_scan(&self, camera_id: Option<&str>) -> Result<ScanOutcome, SecurityError> {
        let mut events = Vec::new();
        let outcome = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

            if let Some(id) = camera_id {
                if !state.cameras.iter().any(|c| c.id == id) {
                    return Err(SecurityError::CameraNotFound {
                        camera_id: id.to_string(),
                    });
                }
            }

            let now = Utc::now();
            let mut findings = HashMap::new();
            for camera in state
                .cameras
                .iter_mut()
                .filter(|c| camera_id.is_none_or(|id| c.id == id))
            {
                let vulns = random_vulnerabilities(self.entropy.as_ref());
                camera.vulnerabilities = vulns.clone();
                camera.last_scan = Some(now);
                camera.last_activity = "Security scan completed".to_string();
                risk::recompute(camera);
                findings.insert(camera.id.clone(), vulns);
                events.push(SecurityEvent::CameraUpdated(camera.clone()));
            }

            let overall = risk::overall(&state.cameras);
            events.push(SecurityEvent::RiskUpdated(overall));

            ScanOutcome {
                findings,
                cameras: state.cameras.clone(),
                overall_risk: overall,
            }
        };

        tracing::info!(
            target_camera = camera_id.unwrap_or("all"),
            scanned = outcome.findings.len(),
            "vulnerability scan completed"
        );
        self.publish_all(events);
        Ok(outcome)
    }

    /// Mark a protection applied and drop the findings it neutralizes.
    pub fn apply_hardening(&self, camera_id: &str, action: &str) -> Result<Camera, SecurityError> {
        let mut events = Vec::new();
        let camera = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());

            if !catalog::is_known_action(action) {
                return Err(SecurityError::UnknownAction {
                    action: action.to_string(),
                });
            }

            let camera = state
                .cameras
                .iter_mut()
                .find(|c| c.id == camera_id)
                .ok_or_else(|| SecurityError::CameraNotFound {
                    camera_id: camera_id.to_string(),
                })?;

            let now = Utc::now();
            // Every camera carries the full protection library, but a camera
            // built before a library change may not
            let Some(protection) = camera.protection_mut(action) else {
                return Err(SecurityError::UnknownAction {
                    action: action.to_string(),
                });
            };
            protection.applied = true;
            protection.applied_at = Some(now);
            let (label, targets) = (protection.label.clone(), protection.targets.clone());

            if !targets.is_empty() {
                camera
                    .vulnerabilities
                    .retain(|vuln| !targets.contains(&vuln.id));
            }
            camera.last_activity = format!("{} applied", label);
            risk::recompute(camera);

            let updated = camera.clone();
            events.push(SecurityEvent::CameraUpdated(updated.clone()));
            events.push(SecurityEvent::RiskUpdated(risk::overall(&state.cameras)));

            let alert = Alert {
                id: Uuid::new_v4(),
                camera_id: camera_id.to_string(),
                severity: AlertSeverity::Info,
                message: format!("{} executed on {}", label, updated.name),
                timestamp: now,
                category: AlertCategory::Hardening,
            };
            push_capped(&mut state.alerts, alert.clone());
            events.push(SecurityEvent::AlertRaised(alert));

            updated
        };

        tracing::info!(camera_id, action, "hardening action applied");
        self.publish_all(events);
        Ok(camera)
    }

    /// Register a virtual camera with a fresh baseline and a random initial
    /// vulnerability set.
    pub fn register_camera(&self, request: NewCameraRequest) -> Result<Camera, SecurityError> {
        let name = request.name.trim();
        let location = request.location.trim();
        let stream_url = request.stream_url.trim();
        if name.is_empty() || location.is_empty() || stream_url.is_empty() {
            return Err(SecurityError::validation(
                "Name, location and streamUrl are required",
            ));
        }

        let rtsp_url = request
            .rtsp_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| format!("rtsp://virtual/{}", kebab_case(name)));

        let mut camera = Camera {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            location: location.to_string(),
            status: CameraStatus::Online,
            risk_level: RiskLevel::Medium,
            risk_score: 0,
            base_score: self.entropy.base_score(),
            stream_url: stream_url.to_string(),
            rtsp_url,
            last_activity: "Just now".to_string(),
            encryption: EncryptionInfo::default(),
            vulnerabilities: random_vulnerabilities(self.entropy.as_ref()),
            protections: catalog::default_protections(),
            created_at: Utc::now(),
            last_scan: None,
        };
        risk::recompute(&mut camera);

        let mut events = Vec::new();
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.cameras.push(camera.clone());
            events.push(SecurityEvent::CameraCreated(camera.clone()));
            events.push(SecurityEvent::RiskUpdated(risk::overall(&state.cameras)));
        }

        tracing::info!(camera_id = %camera.id, name = %camera.name, "virtual camera registered");
        self.publish_all(events);
        Ok(camera)
    }

    /// Stream endpoints for one camera; `None` when the id is unknown
    pub fn camera_stream(&self, camera_id: &str) -> Option<StreamDescriptor> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .cameras
            .iter()
            .find(|c| c.id == camera_id)
            .map(|camera| StreamDescriptor {
                camera_id: camera.id.clone(),
                stream_url: camera.stream_url.clone(),
                rtsp_url: camera.rtsp_url.clone(),
                encryption: camera.encryption.clone(),
                timestamp: Utc::now(),
            })
    }

    /// One intrusion tick: a random template fires against a random camera.
    pub fn simulate_intrusion(&self) {
        let mut events = Vec::new();
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            if state.cameras.is_empty() {
                return;
            }

            let camera_index = self.entropy.next_below(state.cameras.len());
            let template =
                &INTRUSION_TEMPLATES[self.entropy.next_below(INTRUSION_TEMPLATES.len())];
            let now = Utc::now();

            let camera = &mut state.cameras[camera_index];
            camera.last_activity = "Intrusion blocked just now".to_string();
            if template.severity == Severity::High {
                camera.status = CameraStatus::Alert;
            }

            let intrusion = IntrusionEvent {
                id: Uuid::new_v4(),
                camera_id: camera.id.clone(),
                kind: template.kind.to_string(),
                severity: template.severity,
                description: template.description.to_string(),
                timestamp: now,
                status: IntrusionStatus::Blocked,
            };
            let alert = Alert {
                id: Uuid::new_v4(),
                camera_id: camera.id.clone(),
                severity: template.severity.into(),
                message: format!("{}: {}", camera.name, template.message),
                timestamp: now,
                category: AlertCategory::Intrusion,
            };

            risk::recompute(camera);
            let updated = camera.clone();
            tracing::debug!(camera_id = %updated.id, kind = template.kind, "simulated intrusion");

            push_capped(&mut state.intrusions, intrusion.clone());
            push_capped(&mut state.alerts, alert.clone());

            events.push(SecurityEvent::IntrusionDetected(intrusion));
            events.push(SecurityEvent::AlertRaised(alert));
            events.push(SecurityEvent::CameraUpdated(updated));
            events.push(SecurityEvent::RiskUpdated(risk::overall(&state.cameras)));
        }
        self.publish_all(events);
    }

    /// One activity tick: each camera independently refreshes its recency
    /// text with the given probability.
    pub fn refresh_activity(&self, probability: f64) {
        let mut events = Vec::new();
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            for camera in state.cameras.iter_mut() {
                if self.entropy.next_f64() >= probability {
                    continue;
                }
                let minutes = self.entropy.next_below(5) + 1;
                camera.last_activity = format!("{} mins ago", minutes);
                if camera.status == CameraStatus::Alert && camera.risk_level != RiskLevel::High {
                    camera.status = CameraStatus::Online;
                }
                events.push(SecurityEvent::CameraUpdated(camera.clone()));
            }
        }
        if !events.is_empty() {
            tracing::debug!(updated = events.len(), "activity refresh tick");
        }
        self.publish_all(events);
    }

    fn publish_all(&self, events: Vec<SecurityEvent>) {
        for event in events {
            self.publisher.publish(event);
        }
    }
}

fn seed_camera(seed: &CameraSeed, entropy: &dyn EntropySource) -> Camera {
    let base_score = entropy.base_score();
    let mut camera = Camera {
        id: seed.id.to_string(),
        name: seed.name.to_string(),
        location: seed.location.to_string(),
        status: CameraStatus::Online,
        risk_level: RiskLevel::Medium,
        risk_score: 0,
        base_score,
        stream_url: seed.stream_url.to_string(),
        rtsp_url: seed.rtsp_url.to_string(),
        last_activity: "Just now".to_string(),
        encryption: EncryptionInfo::default(),
        vulnerabilities: Vec::new(),
        protections: catalog::default_protections(),
        created_at: Utc::now(),
        last_scan: None,
    };
    risk::recompute(&mut camera);
    camera
}

/// Shuffle-and-slice: 0-2 catalog entries, uniformly
fn random_vulnerabilities(entropy: &dyn EntropySource) -> Vec<VulnerabilityFinding> {
    let catalog = catalog::vulnerability_catalog();
    let count = entropy.next_below(3);
    entropy
        .shuffled_indices(catalog.len())
        .into_iter()
        .take(count)
        .map(|i| catalog[i].clone())
        .collect()
}

fn push_capped<T>(log: &mut VecDeque<T>, entry: T) {
    log.push_front(entry);
    log.truncate(MAX_LOG_ENTRIES);
}

fn kebab_case(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}
