use serde::Serialize;

/// The stage an oracle scenario has reached.
///
/// Transitions only move forward:
/// `Idle -> Resolving -> VerifyingAddress -> [VerifyingCanonName] -> Complete`,
/// with `Failed` reachable from any stage after `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioState {
    /// Nothing has run yet; also the stage at which input validation fails.
    #[default]
    Idle,

    /// Waiting on the resolver.
    Resolving,

    /// Walking the records and checking address literals.
    VerifyingAddress,

    /// Checking canonical names (hints scenario only).
    VerifyingCanonName,

    /// Every check passed.
    Complete,

    /// A check failed; the outcome records which stage it happened in.
    Failed,
}

impl ScenarioState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScenarioState::Complete | ScenarioState::Failed)
    }
}
