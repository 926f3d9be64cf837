//! Application setup and wiring

use std::sync::Arc;

use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::application::auth::{LoginUseCase, SignupUseCase, ValidateTokenUseCase};
use crate::application::security::SecurityService;
use crate::config::Config;
use crate::infrastructure::auth::{InMemoryUserRepository, JwtService, PasswordHasher};
use crate::infrastructure::entropy::{EntropySource, StdEntropy};
use crate::infrastructure::events::{BroadcastPublisher, EventPublisher};
use crate::infrastructure::simulation::spawn_simulation_workers;
use crate::presentation::routes::{AppState, create_router};

/// Handle returned from create_app for graceful shutdown coordination
pub struct AppHandle {
    pub router: Router,
    pub shutdown_token: CancellationToken,
}

/// Wire the service graph, spawn the simulation workers and build the router.
pub fn create_app(config: &Config) -> AppHandle {
    let shutdown_token = CancellationToken::new();

    // A fixed seed makes every scan and intrusion reproducible across runs
    let entropy: Arc<dyn EntropySource> = match config.simulation.rng_seed {
        Some(seed) => {
            tracing::info!(seed, "using seeded entropy source");
            Arc::new(StdEntropy::seeded(seed))
        }
        None => Arc::new(StdEntropy::from_os()),
    };

    let events = Arc::new(BroadcastPublisher::new(256));
    let security_service = Arc::new(SecurityService::new(
        events.clone() as Arc<dyn EventPublisher>,
        entropy,
    ));

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_service = Arc::new(JwtService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_hours,
    ));

    let signup_use_case = Arc::new(SignupUseCase::new(
        user_repository.clone(),
        password_hasher.clone(),
        jwt_service.clone(),
    ));
    let login_use_case = Arc::new(LoginUseCase::new(
        user_repository,
        password_hasher,
        jwt_service.clone(),
    ));
    let validate_token_use_case = Arc::new(ValidateTokenUseCase::new(jwt_service));

    spawn_simulation_workers(
        security_service.clone(),
        &config.simulation,
        shutdown_token.clone(),
    );

    let app_state = AppState {
        security_service,
        events,
        signup_use_case,
        login_use_case,
        validate_token_use_case,
    };

    AppHandle {
        router: create_router(app_state, config),
        shutdown_token,
    }
}
