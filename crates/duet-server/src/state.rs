use duet::conversation::Orchestrator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub max_turns: i64,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, max_turns: i64) -> Self {
        Self {
            orchestrator,
            max_turns,
        }
    }
}
