//! The getaddrinfo oracle.
//!
//! A run goes selector → invoker → verifier and produces exactly one
//! [`VerificationOutcome`]:
//!
//! - [`selector`]: turns the harness input into a [`Scenario`]
//! - [`invoker`]: issues the scenario's single resolution call
//! - [`verifier`]: walks the result list and checks it
//!
//! The result list is owned by the run and dropped before the outcome is
//! returned, whichever check fails.

pub mod config;
pub mod invoker;
pub mod selector;
pub mod verifier;

pub use config::OracleConfig;
pub use selector::{AddrinfoTestInput, Scenario};
pub use verifier::{ipv4_literal, ipv6_literal, VerificationSummary, Verifier};

use crate::base::oracleerror::{FailureKind, OracleError};
use crate::base::scenariostate::ScenarioState;
use crate::base::statuscode::Status;
use crate::dns::Resolve;
use serde::Serialize;

/// The result of one scenario. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    passed: bool,
    failure_kind: Option<FailureKind>,
    message: String,
    state: ScenarioState,
    failed_stage: Option<ScenarioState>,
    records_examined: usize,
    #[serde(skip)]
    error: Option<OracleError>,
}

impl VerificationOutcome {
    fn passed(summary: VerificationSummary) -> Self {
        Self {
            passed: true,
            failure_kind: None,
            message: String::new(),
            state: ScenarioState::Complete,
            failed_stage: None,
            records_examined: summary.records,
            error: None,
        }
    }

    fn failed(error: OracleError, records_examined: usize) -> Self {
        Self {
            passed: false,
            failure_kind: Some(error.failure_kind()),
            message: error.to_string(),
            state: ScenarioState::Failed,
            failed_stage: Some(error.stage()),
            records_examined,
            error: Some(error),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure_kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `Complete` or `Failed`.
    pub fn state(&self) -> ScenarioState {
        self.state
    }

    /// The stage a failed run stopped in.
    pub fn failed_stage(&self) -> Option<ScenarioState> {
        self.failed_stage
    }

    /// Records the verifier looked at. Equals the list length on success.
    pub fn records_examined(&self) -> usize {
        self.records_examined
    }

    pub fn error(&self) -> Option<&OracleError> {
        self.error.as_ref()
    }

    pub fn status(&self) -> Status {
        match &self.error {
            Some(err) => Status::from(err),
            None => Status::ok(),
        }
    }
}

impl From<VerificationOutcome> for Status {
    fn from(outcome: VerificationOutcome) -> Self {
        outcome.status()
    }
}

/// Drives scenarios against a resolver.
///
/// # Example
///
/// ```rust,ignore
/// use gaioracle::dns::{GaiResolver, HostRelay};
/// use gaioracle::oracle::{AddrInfoOracle, AddrinfoTestInput};
///
/// let oracle = AddrInfoOracle::new(HostRelay::new(GaiResolver::new()));
/// let status = oracle.run(&AddrinfoTestInput::new(true));
/// assert!(status.is_ok());
/// ```
#[derive(Debug)]
pub struct AddrInfoOracle<R> {
    resolver: R,
    config: OracleConfig,
    verifier: Verifier,
}

impl<R: Resolve> AddrInfoOracle<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, OracleConfig::default())
    }

    pub fn with_config(resolver: R, config: OracleConfig) -> Self {
        let verifier = Verifier::new(&config);
        Self {
            resolver,
            config,
            verifier,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Select, resolve and verify; report the harness-facing status.
    pub fn run(&self, input: &AddrinfoTestInput) -> Status {
        self.evaluate(input).status()
    }

    /// Like [`run`](Self::run), starting from a JSON input document.
    #[cfg(feature = "json")]
    pub fn run_json(&self, input: &str) -> Status {
        match AddrinfoTestInput::from_json(input) {
            Ok(input) => self.run(&input),
            Err(err) => {
                tracing::warn!(error = %err, "rejecting malformed input");
                VerificationOutcome::failed(err, 0).status()
            }
        }
    }

    /// Select, resolve and verify; report the full outcome.
    pub fn evaluate(&self, input: &AddrinfoTestInput) -> VerificationOutcome {
        match Scenario::select(input) {
            Ok(scenario) => self.run_scenario(scenario),
            Err(err) => {
                tracing::warn!(error = %err, "rejecting input");
                VerificationOutcome::failed(err, 0)
            }
        }
    }

    /// Run one scenario to completion.
    pub fn run_scenario(&self, scenario: Scenario) -> VerificationOutcome {
        tracing::debug!(%scenario, state = ?ScenarioState::Resolving, "scenario started");
        let query = scenario.query(&self.config);

        let list = match invoker::invoke(&self.resolver, &query) {
            Ok(list) => list,
            Err(err) => return self.finish(scenario, VerificationOutcome::failed(err, 0)),
        };

        tracing::debug!(%scenario, state = ?ScenarioState::VerifyingAddress, "verifying");
        let outcome = match self
            .verifier
            .verify(&list, scenario.checks_canonical_name())
        {
            Ok(summary) => VerificationOutcome::passed(summary),
            Err(err) => {
                let examined = match &err {
                    OracleError::IncorrectAddress { index, .. } => index + 1,
                    _ => list.len(),
                };
                VerificationOutcome::failed(err, examined)
            }
        };
        drop(list);

        self.finish(scenario, outcome)
    }

    fn finish(&self, scenario: Scenario, outcome: VerificationOutcome) -> VerificationOutcome {
        match outcome.failed_stage() {
            None => tracing::debug!(%scenario, records = outcome.records_examined(), "scenario passed"),
            Some(stage) => tracing::warn!(
                %scenario,
                stage = ?stage,
                message = %outcome.message(),
                "scenario failed"
            ),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::statuscode::StatusCode;
    use crate::dns::HostsFileResolver;

    const HOSTS: &str = "127.0.0.1 localhost\n::1 localhost ip6-localhost\n";

    #[test]
    fn test_both_scenarios_pass() {
        let oracle = AddrInfoOracle::new(HostsFileResolver::parse(HOSTS));
        assert!(oracle.run(&AddrinfoTestInput::new(false)).is_ok());
        assert!(oracle.run(&AddrinfoTestInput::new(true)).is_ok());
    }

    #[test]
    fn test_missing_selector() {
        let oracle = AddrInfoOracle::new(HostsFileResolver::parse(HOSTS));
        let outcome = oracle.evaluate(&AddrinfoTestInput::empty());

        assert!(!outcome.is_passed());
        assert_eq!(outcome.failure_kind(), Some(FailureKind::InvalidInput));
        assert_eq!(outcome.failed_stage(), Some(ScenarioState::Idle));
        assert_eq!(outcome.status().code(), StatusCode::InvalidArgument);
    }

    #[test]
    fn test_outcome_records_examined() {
        let oracle = AddrInfoOracle::new(HostsFileResolver::parse(HOSTS));
        let outcome = oracle.run_scenario(Scenario::NoHints);
        assert!(outcome.is_passed());
        assert_eq!(outcome.state(), ScenarioState::Complete);
        assert_eq!(outcome.records_examined(), 2);
        assert_eq!(outcome.message(), "");
    }

    #[test]
    fn test_wrong_canonical_name_fails_hints_only() {
        let oracle = AddrInfoOracle::new(HostsFileResolver::parse("127.0.0.1 loopback localhost\n"));

        assert!(oracle.run_scenario(Scenario::NoHints).is_passed());

        let outcome = oracle.run_scenario(Scenario::Hints);
        assert_eq!(outcome.failure_kind(), Some(FailureKind::IncorrectCanonicalName));
        assert_eq!(outcome.failed_stage(), Some(ScenarioState::VerifyingCanonName));
        assert_eq!(
            outcome.message(),
            "getaddrinfo() returned incorrect canonical name"
        );
    }
}
