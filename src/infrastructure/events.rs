//! Event fan-out.
//!
//! Registry mutations publish [`SecurityEvent`]s through an injected
//! [`EventPublisher`]; the WebSocket layer subscribes to the broadcast
//! implementation, tests use the no-op one.

use tokio::sync::broadcast;

use crate::domain::security::{Alert, Camera, IntrusionEvent};

/// A registry state change worth pushing to connected viewers
#[derive(Debug, Clone)]
pub enum SecurityEvent {
    CameraUpdated(Camera),
    CameraCreated(Camera),
    AlertRaised(Alert),
    IntrusionDetected(IntrusionEvent),
    RiskUpdated(u32),
}

/// Publisher seam between the registry and the real-time channel
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: SecurityEvent);
}

/// Fan-out over a tokio broadcast channel; dropping events when no viewer
/// is subscribed is fine
pub struct BroadcastPublisher {
    tx: broadcast::Sender<SecurityEvent>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SecurityEvent> {
        self.tx.subscribe()
    }
}

impl EventPublisher for BroadcastPublisher {
    fn publish(&self, event: SecurityEvent) {
        // Err means no live subscribers; nothing to do
        let _ = self.tx.send(event);
    }
}

/// Publisher that discards everything; used in tests
pub struct NoopPublisher;

impl EventPublisher for NoopPublisher {
    fn publish(&self, _event: SecurityEvent) {}
}
