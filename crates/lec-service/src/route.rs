//! The path one facade call takes through the generation states.

use lec_core::enums::GenerationState;
use tracing::error;

#[derive(Debug)]
pub(crate) struct Route {
    states: Vec<GenerationState>,
}

impl Route {
    pub(crate) fn start() -> Self {
        Self {
            states: vec![GenerationState::Idle],
        }
    }

    pub(crate) fn current(&self) -> GenerationState {
        self.states
            .last()
            .copied()
            .unwrap_or(GenerationState::Idle)
    }

    /// Record a transition. Transitions the state machine does not allow are
    /// logged and still recorded, so the report shows what actually happened.
    pub(crate) fn advance(&mut self, next: GenerationState) {
        let current = self.current();
        if !current.can_transition_to(next) {
            error!(from = %current, to = %next, "invalid generation state transition");
        }
        self.states.push(next);
    }

    pub(crate) fn into_states(self) -> Vec<GenerationState> {
        self.states
    }
}
