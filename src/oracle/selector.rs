//! Scenario selection from the harness input.

use super::config::OracleConfig;
use crate::base::oracleerror::OracleError;
use crate::dns::{AddrInfoHints, AiFlags, FamilyMask, ResolutionQuery, SocketType};
use serde::Deserialize;
use std::fmt;

/// Input handed over by the harness.
///
/// `use_addrinfo_hints` is required; `None` means the harness never set it,
/// which is a caller error rather than an implicit `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct AddrinfoTestInput {
    #[serde(default)]
    pub use_addrinfo_hints: Option<bool>,
}

impl AddrinfoTestInput {
    pub fn new(use_addrinfo_hints: bool) -> Self {
        Self {
            use_addrinfo_hints: Some(use_addrinfo_hints),
        }
    }

    /// An input with the selector missing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON document such as `{"use_addrinfo_hints": true}`.
    ///
    /// Unknown fields are ignored. Anything that does not deserialize,
    /// including a selector of the wrong type, is rejected as malformed.
    #[cfg(feature = "json")]
    pub fn from_json(text: &str) -> Result<Self, OracleError> {
        serde_json::from_str(text).map_err(|e| OracleError::MalformedInput(e.to_string()))
    }
}

/// The two fixed resolution scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Resolve with no hints at all.
    NoHints,
    /// Resolve IPv4|IPv6, stream sockets, canonical name requested.
    Hints,
}

impl Scenario {
    /// Pick the scenario for `input`, or reject it before anything runs.
    pub fn select(input: &AddrinfoTestInput) -> Result<Self, OracleError> {
        match input.use_addrinfo_hints {
            Some(true) => Ok(Scenario::Hints),
            Some(false) => Ok(Scenario::NoHints),
            None => Err(OracleError::MissingSelector),
        }
    }

    /// The query this scenario issues. Built fresh on every call.
    pub fn query(&self, config: &OracleConfig) -> ResolutionQuery {
        let hints = match self {
            Scenario::NoHints => None,
            Scenario::Hints => Some(AddrInfoHints {
                families: FamilyMask::IPV4 | FamilyMask::IPV6,
                socket_type: SocketType::Stream,
                flags: AiFlags::CANONNAME,
            }),
        };
        ResolutionQuery::new(config.hostname.clone(), hints)
    }

    pub fn checks_canonical_name(&self) -> bool {
        matches!(self, Scenario::Hints)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::NoHints => f.write_str("no-hints"),
            Scenario::Hints => f.write_str("hints"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        assert_eq!(
            Scenario::select(&AddrinfoTestInput::new(false)).unwrap(),
            Scenario::NoHints
        );
        assert_eq!(
            Scenario::select(&AddrinfoTestInput::new(true)).unwrap(),
            Scenario::Hints
        );
        assert_eq!(
            Scenario::select(&AddrinfoTestInput::empty()).unwrap_err(),
            OracleError::MissingSelector
        );
    }

    #[test]
    fn test_queries() {
        let config = OracleConfig::default();

        let plain = Scenario::NoHints.query(&config);
        assert_eq!(plain.name().as_str(), "localhost");
        assert!(plain.hints().is_none());

        let hinted = Scenario::Hints.query(&config);
        let hints = hinted.hints().expect("hints scenario carries hints");
        assert_eq!(hints.families, FamilyMask::ANY);
        assert_eq!(hints.socket_type, SocketType::Stream);
        assert!(hints.flags.contains(AiFlags::CANONNAME));
        assert!(hinted.wants_canonical_name());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json() {
        let input = AddrinfoTestInput::from_json(r#"{"use_addrinfo_hints": true}"#).unwrap();
        assert_eq!(input, AddrinfoTestInput::new(true));

        let missing = AddrinfoTestInput::from_json(r#"{"something_else": 1}"#).unwrap();
        assert_eq!(missing.use_addrinfo_hints, None);

        let null = AddrinfoTestInput::from_json(r#"{"use_addrinfo_hints": null}"#).unwrap();
        assert_eq!(null.use_addrinfo_hints, None);

        let wrong_type = AddrinfoTestInput::from_json(r#"{"use_addrinfo_hints": "yes"}"#);
        assert!(matches!(wrong_type, Err(OracleError::MalformedInput(_))));

        let broken = AddrinfoTestInput::from_json("{");
        assert!(matches!(broken, Err(OracleError::MalformedInput(_))));
    }
}
