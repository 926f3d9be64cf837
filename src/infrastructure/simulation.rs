//! Periodic simulation workers.
//!
//! Two independent timers drive the demo: the intrusion worker fires a
//! random template against a random camera, the activity worker refreshes
//! per-camera recency text. Spawned once from `create_app`; both respect
//! the shutdown token.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::application::security::SecurityService;
use crate::config::SimulationConfig;

/// Spawn the intrusion and activity workers. Call at most once per service.
pub fn spawn_simulation_workers(
    service: Arc<SecurityService>,
    config: &SimulationConfig,
    shutdown_token: CancellationToken,
) {
    if !config.enabled {
        tracing::info!("simulation disabled by configuration");
        return;
    }

    let intrusion_interval = Duration::from_secs(config.intrusion_interval_seconds);
    let activity_interval = Duration::from_secs(config.activity_interval_seconds);
    let activity_probability = config.activity_probability;

    {
        let service = service.clone();
        let token = shutdown_token.clone();
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(intrusion_interval);
            // First tick is immediate; skip it so the estate starts calm
            timer.tick().await;

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        service.simulate_intrusion();
                    }
                    _ = token.cancelled() => {
                        tracing::info!("intrusion worker shutting down gracefully");
                        return;
                    }
                }
            }
        });
    }

    tokio::spawn(async move {
        let mut timer = tokio::time::interval(activity_interval);
        timer.tick().await;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    service.refresh_activity(activity_probability);
                }
                _ = shutdown_token.cancelled() => {
                    tracing::info!("activity worker shutting down gracefully");
                    return;
                }
            }
        }
    });

    tracing::info!(
        intrusion_interval_seconds = config.intrusion_interval_seconds,
        activity_interval_seconds = config.activity_interval_seconds,
        "simulation workers started"
    );
}
