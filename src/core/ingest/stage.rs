//! Per-entity ingestion state machine
//!
//! Each entity stage advances `NotStarted -> Fetching -> Transforming ->
//! Loading -> Committed`. `Transforming` and `Loading` alternate once per
//! batch. `Failed` is terminal and reachable from any active state; there
//! is no recovery transition, a failed stage stays failed for the run.

use crate::domain::{CompassError, Entity, Result};
use std::fmt;

/// State of one entity's ingestion stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    NotStarted,
    Fetching,
    Transforming,
    Loading,
    Committed,
    Failed,
}

impl StageState {
    /// Whether a transition from `self` to `to` is legal
    pub fn can_transition(self, to: StageState) -> bool {
        use StageState::*;
        match (self, to) {
            (NotStarted, Fetching) => true,
            (Fetching, Transforming) => true,
            (Transforming, Loading) => true,
            // Next batch of the same stage.
            (Loading, Transforming) => true,
            (Loading, Committed) => true,
            // Fetch may complete with zero batches.
            (Fetching, Committed) => true,
            (NotStarted | Fetching | Transforming | Loading, Failed) => true,
            _ => false,
        }
    }

    /// Whether the stage can make no further progress
    pub fn is_terminal(self) -> bool {
        matches!(self, StageState::Committed | StageState::Failed)
    }
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageState::NotStarted => "not_started",
            StageState::Fetching => "fetching",
            StageState::Transforming => "transforming",
            StageState::Loading => "loading",
            StageState::Committed => "committed",
            StageState::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Tracks the state of one entity stage through a run
#[derive(Debug, Clone)]
pub struct StageProgress {
    entity: Entity,
    state: StageState,
}

impl StageProgress {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            state: StageState::NotStarted,
        }
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    /// Advance to the next state
    ///
    /// # Errors
    ///
    /// Returns a state error if the transition is not legal; an illegal
    /// transition indicates a bug in the coordinator, not bad source data.
    pub fn transition(&mut self, to: StageState) -> Result<()> {
        if !self.state.can_transition(to) {
            return Err(CompassError::State(format!(
                "illegal transition for {}: {} -> {}",
                self.entity, self.state, to
            )));
        }
        tracing::trace!(entity = %self.entity, from = %self.state, to = %to, "Stage transition");
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_happy_path() {
        let mut progress = StageProgress::new(Entity::School);
        assert_eq!(progress.state(), StageState::NotStarted);
        progress.transition(StageState::Fetching).unwrap();
        progress.transition(StageState::Transforming).unwrap();
        progress.transition(StageState::Loading).unwrap();
        progress.transition(StageState::Committed).unwrap();
        assert!(progress.state().is_terminal());
    }

    #[test]
    fn test_batch_loop_alternates_transform_and_load() {
        let mut progress = StageProgress::new(Entity::Location);
        progress.transition(StageState::Fetching).unwrap();
        for _ in 0..3 {
            progress.transition(StageState::Transforming).unwrap();
            progress.transition(StageState::Loading).unwrap();
        }
        progress.transition(StageState::Committed).unwrap();
    }

    #[test]
    fn test_zero_batches_commits_from_fetching() {
        let mut progress = StageProgress::new(Entity::Finance);
        progress.transition(StageState::Fetching).unwrap();
        progress.transition(StageState::Committed).unwrap();
    }

    #[test_case(StageState::NotStarted)]
    #[test_case(StageState::Fetching)]
    #[test_case(StageState::Transforming)]
    #[test_case(StageState::Loading)]
    fn test_failed_reachable_from_active_states(from: StageState) {
        assert!(from.can_transition(StageState::Failed));
    }

    #[test]
    fn test_terminal_states_have_no_exit() {
        for to in [
            StageState::NotStarted,
            StageState::Fetching,
            StageState::Transforming,
            StageState::Loading,
            StageState::Committed,
            StageState::Failed,
        ] {
            assert!(!StageState::Committed.can_transition(to));
            assert!(!StageState::Failed.can_transition(to));
        }
    }

    #[test]
    fn test_illegal_transition_is_state_error() {
        let mut progress = StageProgress::new(Entity::School);
        let err = progress.transition(StageState::Loading).unwrap_err();
        assert!(matches!(err, CompassError::State(_)));
        // State unchanged after the rejected transition.
        assert_eq!(progress.state(), StageState::NotStarted);
    }

    #[test]
    fn test_no_skip_from_fetching_to_loading() {
        assert!(!StageState::Fetching.can_transition(StageState::Loading));
    }
}
