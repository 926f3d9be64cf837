//! Fixed catalogs driving the simulation: known vulnerabilities, available
//! hardening actions, intrusion templates, and the seed camera estate.

use once_cell::sync::Lazy;

use super::entities::{ProtectionState, VulnerabilityFinding};
use super::value_objects::Severity;

/// Template used by the intrusion simulation worker
#[derive(Debug, Clone)]
pub struct IntrusionTemplate {
    pub kind: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub message: &'static str,
}

/// Fixed descriptor for a camera created at process start
#[derive(Debug, Clone)]
pub struct CameraSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub stream_url: &'static str,
    pub rtsp_url: &'static str,
}

fn finding(
    id: &str,
    label: &str,
    severity: Severity,
    description: &str,
    recommendation: &str,
) -> VulnerabilityFinding {
    VulnerabilityFinding {
        id: id.to_string(),
        label: label.to_string(),
        severity,
        description: description.to_string(),
        recommendation: recommendation.to_string(),
    }
}

static VULNERABILITY_CATALOG: Lazy<Vec<VulnerabilityFinding>> = Lazy::new(|| {
    vec![
        finding(
            "weak-password",
            "Weak Password Policy",
            Severity::High,
            "Camera credentials can be guessed with a short brute-force attack.",
            "Enforce strong password rotation and MFA for remote access.",
        ),
        finding(
            "open-rtsp",
            "Exposed RTSP Stream",
            Severity::High,
            "RTSP stream is accessible without encryption over public network.",
            "Tunnel the stream through TLS and restrict access by IP.",
        ),
        finding(
            "open-ports",
            "Risky Open Ports",
            Severity::Medium,
            "Unused TCP/UDP ports are exposed to the internet.",
            "Close ports 23, 554, 8000 unless strictly required.",
        ),
        finding(
            "outdated-firmware",
            "Outdated Firmware",
            Severity::Medium,
            "Camera firmware is 18 months out of date.",
            "Apply vendor patches to prevent known exploits.",
        ),
        finding(
            "unencrypted-storage",
            "Missing Encryption at Rest",
            Severity::Low,
            "Video footage stored without encryption.",
            "Enable AES-256 encryption for storage volumes.",
        ),
    ]
});

struct ProtectionSpec {
    id: &'static str,
    label: &'static str,
    description: &'static str,
    targets: &'static [&'static str],
}

static PROTECTION_LIBRARY: &[ProtectionSpec] = &[
    ProtectionSpec {
        id: "strong-password",
        label: "Enforce Strong Passwords",
        description: "Apply random 16-char credentials & rotate automatically.",
        targets: &["weak-password"],
    },
    ProtectionSpec {
        id: "close-ports",
        label: "Close Risky Ports",
        description: "Shut down Telnet/RTSP ports & restrict inbound firewall rules.",
        targets: &["open-ports"],
    },
    ProtectionSpec {
        id: "secure-stream",
        label: "Secure Streams w/ TLS",
        description: "Proxy RTSP stream through TLS w/ rotating keys.",
        targets: &["open-rtsp"],
    },
    ProtectionSpec {
        id: "block-attacker",
        label: "Block Active Attacker",
        description: "Blacklist offending IPs & rate-limit brute-force attempts.",
        targets: &[],
    },
    ProtectionSpec {
        id: "update-firmware",
        label: "Patch Firmware",
        description: "Roll out vendor firmware updates & reboot safely.",
        targets: &["outdated-firmware"],
    },
];

pub static INTRUSION_TEMPLATES: &[IntrusionTemplate] = &[
    IntrusionTemplate {
        kind: "rtsp-hijack",
        severity: Severity::High,
        description: "Unauthorized RTSP subscription detected",
        message: "Unauthorized stream pull attempt blocked",
    },
    IntrusionTemplate {
        kind: "brute-force",
        severity: Severity::Medium,
        description: "Repeated login attempts from unknown host",
        message: "Brute-force password attack mitigated",
    },
    IntrusionTemplate {
        kind: "port-scan",
        severity: Severity::Medium,
        description: "Ports 23/554 scanned externally",
        message: "Port scanning source quarantined",
    },
];

pub static SEED_CAMERAS: &[CameraSeed] = &[
    CameraSeed {
        id: "cam-entrance",
        name: "Main Entrance",
        location: "HQ - Lobby",
        stream_url:
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
        rtsp_url: "rtsp://10.1.10.12:554/main",
    },
    CameraSeed {
        id: "cam-parking",
        name: "Parking Lot",
        location: "North Garage",
        stream_url:
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
        rtsp_url: "rtsp://10.1.10.32:554/parking",
    },
    CameraSeed {
        id: "cam-server-room",
        name: "Server Room",
        location: "Building B - Basement",
        stream_url:
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
        rtsp_url: "rtsp://10.1.10.61:554/core",
    },
    CameraSeed {
        id: "cam-lobby",
        name: "Executive Lobby",
        location: "Building A - Floor 1",
        stream_url:
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
        rtsp_url: "rtsp://10.1.10.22:554/lobby",
    },
];

/// The immutable five-entry vulnerability catalog
pub fn vulnerability_catalog() -> &'static [VulnerabilityFinding] {
    &VULNERABILITY_CATALOG
}

/// Fresh per-camera protection states, one per catalog action, unapplied
pub fn default_protections() -> Vec<ProtectionState> {
    PROTECTION_LIBRARY
        .iter()
        .map(|spec| ProtectionState {
            id: spec.id.to_string(),
            label: spec.label.to_string(),
            description: spec.description.to_string(),
            targets: spec.targets.iter().map(|t| t.to_string()).collect(),
            applied: false,
            applied_at: None,
        })
        .collect()
}

/// Whether `action` names a catalog protection
pub fn is_known_action(action: &str) -> bool {
    PROTECTION_LIBRARY.iter().any(|spec| spec.id == action)
}
