//! Oracle configuration.

use crate::dns::Name;
use std::net::{Ipv4Addr, Ipv6Addr};

/// What the oracle resolves and what it expects back.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Hostname resolved by both scenarios (default: `localhost`)
    pub hostname: Name,
    /// Literal every IPv4 record must decode to (default: 127.0.0.1)
    pub expected_ipv4: Ipv4Addr,
    /// Literal every IPv6 record must decode to (default: ::1)
    pub expected_ipv6: Ipv6Addr,
    /// Case-sensitive substring every present canonical name must contain
    /// (default: `localhost`)
    pub canonical_name_substring: String,
    /// Require at least one non-empty canonical name when hints ask for one
    /// (default: false)
    pub require_canonical_name: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            hostname: Name::new("localhost"),
            expected_ipv4: Ipv4Addr::LOCALHOST,
            expected_ipv6: Ipv6Addr::LOCALHOST,
            canonical_name_substring: "localhost".to_string(),
            require_canonical_name: false,
        }
    }
}

impl OracleConfig {
    pub fn with_hostname(mut self, hostname: impl Into<Name>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_expected_ipv4(mut self, addr: Ipv4Addr) -> Self {
        self.expected_ipv4 = addr;
        self
    }

    pub fn with_expected_ipv6(mut self, addr: Ipv6Addr) -> Self {
        self.expected_ipv6 = addr;
        self
    }

    pub fn with_canonical_name_substring(mut self, substring: impl Into<String>) -> Self {
        self.canonical_name_substring = substring.into();
        self
    }

    /// Fail a hinted scenario that comes back without any canonical name.
    pub fn strict_canonical_name(mut self) -> Self {
        self.require_canonical_name = true;
        self
    }
}
