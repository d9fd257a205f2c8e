use crate::base::gaierror::GaiError;
use crate::base::scenariostate::ScenarioState;
use crate::base::statuscode::{Status, StatusCode};
use crate::dns::AddressFamily;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum OracleError {
    // Input Errors
    #[error("addrinfo test input use addrinfo hints not found")]
    MissingSelector,
    #[error("addrinfo test input is malformed: {0}")]
    MalformedInput(String),

    // Resolution Errors
    #[error("getaddrinfo() system call failed")]
    ResolutionFailed {
        hostname: String,
        #[source]
        source: GaiError,
    },

    // Verification Errors
    #[error("getaddrinfo() returned incorrect address string")]
    IncorrectAddress {
        family: AddressFamily,
        found: String,
        index: usize,
    },
    #[error("getaddrinfo() returned incorrect canonical name")]
    IncorrectCanonicalName { found: String, index: usize },
    #[error("getaddrinfo() returned no canonical name")]
    MissingCanonicalName,
}

/// Which check a failed scenario tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidInput,
    ResolutionFailed,
    IncorrectAddress,
    IncorrectCanonicalName,
    MissingCanonicalName,
}

impl OracleError {
    pub fn code(&self) -> StatusCode {
        match self {
            OracleError::MissingSelector | OracleError::MalformedInput(_) => {
                StatusCode::InvalidArgument
            }
            _ => StatusCode::Internal,
        }
    }

    pub fn failure_kind(&self) -> FailureKind {
        match self {
            OracleError::MissingSelector | OracleError::MalformedInput(_) => {
                FailureKind::InvalidInput
            }
            OracleError::ResolutionFailed { .. } => FailureKind::ResolutionFailed,
            OracleError::IncorrectAddress { .. } => FailureKind::IncorrectAddress,
            OracleError::IncorrectCanonicalName { .. } => FailureKind::IncorrectCanonicalName,
            OracleError::MissingCanonicalName => FailureKind::MissingCanonicalName,
        }
    }

    /// The scenario stage in which this error is raised.
    pub fn stage(&self) -> ScenarioState {
        match self {
            OracleError::MissingSelector | OracleError::MalformedInput(_) => ScenarioState::Idle,
            OracleError::ResolutionFailed { .. } => ScenarioState::Resolving,
            OracleError::IncorrectAddress { .. } => ScenarioState::VerifyingAddress,
            OracleError::IncorrectCanonicalName { .. } | OracleError::MissingCanonicalName => {
                ScenarioState::VerifyingCanonName
            }
        }
    }
}

impl From<OracleError> for Status {
    fn from(err: OracleError) -> Self {
        Status::new(err.code(), err.to_string())
    }
}

impl From<&OracleError> for Status {
    fn from(err: &OracleError) -> Self {
        Status::new(err.code(), err.to_string())
    }
}
