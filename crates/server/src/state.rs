use std::sync::Arc;

use service::{auth::SessionGate, catalog::ServiceStore};

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<ServiceStore>,
    pub gate: Arc<SessionGate>,
}

impl ServerState {
    pub fn new(store: ServiceStore, gate: SessionGate) -> Self {
        Self { store: Arc::new(store), gate: Arc::new(gate) }
    }
}
