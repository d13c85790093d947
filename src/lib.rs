pub mod config;
pub mod controllers;
pub mod floorplan;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use floorplan::FloorPlanSessions;
use services::backend::EventBackendClient;

// Sdílený stav pro celou aplikaci
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub backend: EventBackendClient,
    pub sessions: FloorPlanSessions,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let backend = EventBackendClient::from_config(&config.backend, &config.circuit_breaker);

        Arc::new(Self {
            config,
            backend,
            sessions: FloorPlanSessions::new(),
        })
    }
}
