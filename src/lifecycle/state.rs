//! Lifecycle state shared by both controllers.

use serde::Serialize;

/// Where a controller is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::InFlight => "in_flight",
            LifecycleState::Succeeded => "succeeded",
            LifecycleState::Failed => "failed",
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, LifecycleState::InFlight)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of triggering a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Another attempt was in flight; nothing happened.
    Rejected,
    /// The attempt ran to the given terminal state.
    Completed(LifecycleState),
}

impl Outcome {
    pub fn state(&self) -> Option<LifecycleState> {
        match self {
            Outcome::Rejected => None,
            Outcome::Completed(state) => Some(*state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(LifecycleState::default(), LifecycleState::Idle);
        assert!(LifecycleState::InFlight.is_in_flight());
        assert!(!LifecycleState::Failed.is_in_flight());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_value(LifecycleState::InFlight).unwrap(),
            serde_json::json!("in_flight")
        );
        assert_eq!(Outcome::Completed(LifecycleState::Succeeded).state(), Some(LifecycleState::Succeeded));
        assert_eq!(Outcome::Rejected.state(), None);
    }
}
