//! Base types and error handling.
//!
//! Provides the foundational types every scenario reports through:
//! - [`StatusCode`](statuscode::StatusCode) / [`Status`](statuscode::Status): the harness-facing result
//! - [`GaiError`](gaierror::GaiError): resolver failures in the `EAI_*` space
//! - [`OracleError`](oracleerror::OracleError): the oracle's failure taxonomy
//! - [`ScenarioState`](scenariostate::ScenarioState): per-scenario progress

pub mod context;
pub mod gaierror;
pub mod oracleerror;
pub mod scenariostate;
pub mod statuscode;
