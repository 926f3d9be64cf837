//! Camera security domain: registry entities, risk value objects, and the
//! fixed vulnerability/protection/intrusion catalogs.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{Alert, Camera, EncryptionInfo, IntrusionEvent, ProtectionState, VulnerabilityFinding};
pub use errors::SecurityError;
pub use value_objects::{AlertCategory, AlertSeverity, CameraStatus, IntrusionStatus, RiskLevel, Severity};
