//! Risk model: pure recomputation of a camera's score, level, and status.

use crate::domain::security::{Camera, CameraStatus, RiskLevel};

/// Lowest score a camera can reach
pub const MIN_SCORE: u32 = 5;
/// Highest score a camera can reach
pub const MAX_SCORE: u32 = 95;
/// Score reduction per applied protection
const PROTECTION_BONUS: i64 = 6;

/// Recompute `risk_score`, `risk_level`, and the status side effect from the
/// camera's baseline, open findings, and applied protections.
///
/// score = clamp(round(base + Σ weight(severity) − 6 × applied), 5, 95).
/// A high level forces `alert`; otherwise the camera reverts to `online`
/// unless it is explicitly `offline`. Infallible.
pub fn recompute(camera: &mut Camera) {
    let penalty: i64 = camera
        .vulnerabilities
        .iter()
        .map(|v| v.severity.weight() as i64)
        .sum();
    let bonus = PROTECTION_BONUS * camera.applied_protection_count() as i64;

    let raw = (camera.base_score + penalty as f64 - bonus as f64).round() as i64;
    let score = raw.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u32;

    camera.risk_score = score;
    camera.risk_level = RiskLevel::from_score(score);

    if camera.risk_level == RiskLevel::High {
        camera.status = CameraStatus::Alert;
    } else if camera.status != CameraStatus::Offline {
        camera.status = CameraStatus::Online;
    }
}

/// Aggregate risk: arithmetic mean of all camera scores, rounded; 0 for an
/// empty estate.
pub fn overall(cameras: &[Camera]) -> u32 {
    if cameras.is_empty() {
        return 0;
    }
    let total: u64 = cameras.iter().map(|c| c.risk_score as u64).sum();
    ((total as f64) / (cameras.len() as f64)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::security::catalog::{default_protections, vulnerability_catalog};
    use crate::domain::security::{EncryptionInfo, Severity};
    use chrono::Utc;

    fn camera_with_base(base: f64) -> Camera {
        Camera {
            id: "cam-test".to_string(),
            name: "Test".to_string(),
            location: "Lab".to_string(),
            status: CameraStatus::Online,
            risk_level: RiskLevel::Medium,
            risk_score: 0,
            base_score: base,
            stream_url: "https://example.com/stream.mp4".to_string(),
            rtsp_url: "rtsp://example/stream".to_string(),
            last_activity: "Just now".to_string(),
            encryption: EncryptionInfo::default(),
            vulnerabilities: Vec::new(),
            protections: default_protections(),
            created_at: Utc::now(),
            last_scan: None,
        }
    }

    fn finding(severity: Severity) -> crate::domain::security::VulnerabilityFinding {
        vulnerability_catalog()
            .iter()
            .find(|f| f.severity == severity)
            .cloned()
            .unwrap()
    }

    #[test]
    fn server_room_example_from_risk_model() {
        // base 50 + one high finding (30) = 80 => high level, alert status
        let mut camera = camera_with_base(50.0);
        camera.vulnerabilities = vec![finding(Severity::High)];
        recompute(&mut camera);

        assert_eq!(camera.risk_score, 80);
        assert_eq!(camera.risk_level, RiskLevel::High);
        assert_eq!(camera.status, CameraStatus::Alert);
    }

    #[test]
    fn score_is_clamped_to_upper_bound() {
        let mut camera = camera_with_base(59.0);
        camera.vulnerabilities = vec![
            finding(Severity::High),
            finding(Severity::High),
            finding(Severity::Medium),
        ];
        recompute(&mut camera);
        assert_eq!(camera.risk_score, MAX_SCORE);
    }

    #[test]
    fn score_is_clamped_to_lower_bound() {
        let mut camera = camera_with_base(25.0);
        for protection in camera.protections.iter_mut() {
            protection.applied = true;
        }
        recompute(&mut camera);
        assert_eq!(camera.risk_score, MIN_SCORE);
        assert_eq!(camera.risk_level, RiskLevel::Low);
    }

    #[test]
    fn protections_pull_score_down() {
        let mut camera = camera_with_base(45.0);
        recompute(&mut camera);
        let before = camera.risk_score;

        camera.protections[0].applied = true;
        recompute(&mut camera);
        assert_eq!(camera.risk_score, before - 6);
    }

    #[test]
    fn dropping_below_high_reverts_alert_to_online() {
        let mut camera = camera_with_base(50.0);
        camera.vulnerabilities = vec![finding(Severity::High)];
        recompute(&mut camera);
        assert_eq!(camera.status, CameraStatus::Alert);

        camera.vulnerabilities.clear();
        recompute(&mut camera);
        assert_eq!(camera.status, CameraStatus::Online);
    }

    #[test]
    fn offline_camera_stays_offline_below_high() {
        let mut camera = camera_with_base(30.0);
        camera.status = CameraStatus::Offline;
        recompute(&mut camera);
        assert_eq!(camera.status, CameraStatus::Offline);
    }

    #[test]
    fn overall_is_rounded_mean() {
        let mut a = camera_with_base(40.0);
        recompute(&mut a);
        let mut b = camera_with_base(45.0);
        recompute(&mut b);
        assert_eq!(overall(&[a.clone(), b]), 43); // (40+45)/2 = 42.5 -> 43
        assert_eq!(overall(&[]), 0);
        assert_eq!(overall(&[a]), 40);
    }
}
