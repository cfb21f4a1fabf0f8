//! Linear wizard-step controller: a fixed ordered step list, one completion
//! payload per step, and strictly forward-by-submission navigation.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    /// Translation key for the step's header.
    pub title_key: String,
}

impl StepDefinition {
    pub fn new(title_key: impl Into<String>) -> Self {
        Self {
            title_key: title_key.into(),
        }
    }
}

/// Caller misuse of the controller; logged and never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step {got} was completed while step {expected} is active")]
    InvalidStep { expected: usize, got: usize },
    #[error("submit requested before every step was completed")]
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The controller advanced to the given step index.
    Advanced(usize),
    /// The terminal step is complete; the caller may run the submit action.
    ReadyToSubmit,
}

/// One controller per dialog open; dropped on close, cancel, or submit.
/// `D` is the tagged per-step payload type.
pub struct WizardController<D> {
    session_id: Uuid,
    steps: Vec<StepDefinition>,
    current: usize,
    results: BTreeMap<usize, D>,
}

impl<D> WizardController<D> {
    /// Steps are fixed for the controller's lifetime and must not be empty.
    pub fn new(steps: Vec<StepDefinition>) -> Self {
        assert!(!steps.is_empty(), "a wizard needs at least one step");
        Self {
            session_id: Uuid::new_v4(),
            steps,
            current: 0,
            results: BTreeMap::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.steps[self.current]
    }

    /// Payload captured for a step, surviving backward navigation so the
    /// caller can re-render the step pre-filled.
    pub fn step_result(&self, index: usize) -> Option<&D> {
        self.results.get(&index)
    }

    pub fn is_complete(&self) -> bool {
        (0..self.steps.len()).all(|index| self.results.contains_key(&index))
    }

    /// Records `data` for the active step. Completing any other step is
    /// rejected with the state unchanged; completing the terminal step
    /// signals readiness without advancing past it.
    pub fn complete_step(&mut self, index: usize, data: D) -> Result<StepOutcome, WizardError> {
        if index != self.current {
            return Err(WizardError::InvalidStep {
                expected: self.current,
                got: index,
            });
        }

        self.results.insert(index, data);
        if index + 1 < self.steps.len() {
            self.current = index + 1;
            debug!(session = %self.session_id, step = self.current, "wizard advanced");
            Ok(StepOutcome::Advanced(self.current))
        } else {
            debug!(session = %self.session_id, "wizard ready to submit");
            Ok(StepOutcome::ReadyToSubmit)
        }
    }

    /// Steps back by exactly one; a no-op at the first step. Completed step
    /// data is kept.
    pub fn go_back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        debug!(session = %self.session_id, step = self.current, "wizard stepped back");
        true
    }
}
