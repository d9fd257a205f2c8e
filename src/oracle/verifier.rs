//! Result verification.
//!
//! The verifier makes a single forward pass over an [`AddrInfoList`]:
//!
//! 1. Every IPv4/IPv6 record's address is decoded to text and compared with
//!    the expected literal. The first mismatch ends the pass.
//! 2. When canonical names are checked, the first offending name is noted
//!    during the same pass and reported only once every address has passed,
//!    so an address fault always wins over a name fault.
//!
//! Records of any other family are counted and skipped.

use super::config::OracleConfig;
use crate::base::oracleerror::OracleError;
use crate::dns::{AddrInfoList, AddressFamily, ResolutionRecord};
use serde::Serialize;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Dotted-decimal text of a raw IPv4 address, e.g. `127.0.0.1`.
pub fn ipv4_literal(octets: [u8; 4]) -> String {
    Ipv4Addr::from(octets).to_string()
}

/// RFC 5952 text of a raw IPv6 address.
///
/// Lowercase hex, leading zeros dropped, the longest run of two or more zero
/// groups (the first one on a tie) collapsed to `::`, and IPv4-mapped
/// addresses written as `::ffff:a.b.c.d`. Loopback is `::1`.
pub fn ipv6_literal(octets: [u8; 16]) -> String {
    Ipv6Addr::from(octets).to_string()
}

/// Tallies from a completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerificationSummary {
    pub records: usize,
    pub ipv4: usize,
    pub ipv6: usize,
    pub skipped: usize,
    pub canonical_names: usize,
}

/// Checks result lists against an [`OracleConfig`].
#[derive(Debug, Clone)]
pub struct Verifier {
    expected_ipv4: String,
    expected_ipv6: String,
    canonical_name_substring: String,
    require_canonical_name: bool,
}

impl Verifier {
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            expected_ipv4: config.expected_ipv4.to_string(),
            expected_ipv6: config.expected_ipv6.to_string(),
            canonical_name_substring: config.canonical_name_substring.clone(),
            require_canonical_name: config.require_canonical_name,
        }
    }

    /// Verify `list`. `check_canonical_name` enables the name checks of the
    /// hints scenario.
    pub fn verify(
        &self,
        list: &AddrInfoList,
        check_canonical_name: bool,
    ) -> Result<VerificationSummary, OracleError> {
        let mut summary = VerificationSummary::default();
        let mut name_fault: Option<OracleError> = None;
        let mut nonempty_names = 0usize;

        for (index, record) in list.records().enumerate() {
            summary.records += 1;
            self.check_address(index, &record, &mut summary)?;

            if !check_canonical_name {
                continue;
            }
            let Some(name) = record.canonical_name() else {
                continue;
            };
            summary.canonical_names += 1;
            if !name.is_empty() {
                nonempty_names += 1;
            }
            if name_fault.is_none() && !name.contains(self.canonical_name_substring.as_str()) {
                tracing::trace!(index, name = %name, "canonical name mismatch noted");
                name_fault = Some(OracleError::IncorrectCanonicalName {
                    found: name.to_string(),
                    index,
                });
            }
        }

        if let Some(fault) = name_fault {
            tracing::warn!(error = ?fault, "canonical name check failed");
            return Err(fault);
        }
        if check_canonical_name && self.require_canonical_name && nonempty_names == 0 {
            tracing::warn!(records = summary.records, "no canonical name returned");
            return Err(OracleError::MissingCanonicalName);
        }

        Ok(summary)
    }

    fn check_address(
        &self,
        index: usize,
        record: &ResolutionRecord<'_>,
        summary: &mut VerificationSummary,
    ) -> Result<(), OracleError> {
        let (family, found, expected) = match record {
            ResolutionRecord::V4 { octets, .. } => {
                summary.ipv4 += 1;
                (AddressFamily::Inet, ipv4_literal(*octets), &self.expected_ipv4)
            }
            ResolutionRecord::V6 { octets, .. } => {
                summary.ipv6 += 1;
                (AddressFamily::Inet6, ipv6_literal(*octets), &self.expected_ipv6)
            }
            ResolutionRecord::Other { family, .. } => {
                tracing::trace!(index, family, "skipping record of other family");
                summary.skipped += 1;
                return Ok(());
            }
        };

        tracing::trace!(index, %family, address = %found, "verifying record");
        if found != *expected {
            tracing::warn!(index, %family, found = %found, expected = %expected, "address mismatch");
            return Err(OracleError::IncorrectAddress {
                family,
                found,
                index,
            });
        }
        Ok(())
    }
}
