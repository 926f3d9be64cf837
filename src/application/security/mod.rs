//! Security application services: the risk model and the registry service
//! all HTTP/WS handlers and simulation workers operate through.

pub mod risk;
pub mod service;

pub use service::{NewCameraRequest, ScanOutcome, SecurityService, SecuritySnapshot, StreamDescriptor};
