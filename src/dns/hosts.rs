//! Deterministic resolver over hosts-file content.
//!
//! Answers from `/etc/hosts`-formatted text only, without touching the
//! network or NSS. Useful as a host resolver whose answers are fully known in
//! advance, and as a reference when the system resolver is unavailable.

use super::addrinfo::{AddrInfoList, AddressFamily, FamilyMask, ResolutionQuery, ResolutionRecord};
use super::resolve::Resolve;
use crate::base::gaierror::GaiError;
use std::{io, net::IpAddr, path::Path};

const SYSTEM_HOSTS: &str = "/etc/hosts";

#[derive(Debug, Clone)]
struct HostsLine {
    addr: IpAddr,
    /// Official name first, then aliases.
    names: Vec<String>,
}

/// Resolver that answers from parsed hosts-file lines.
///
/// Lookup follows the files backend of the C library:
/// - names compare ASCII case-insensitively
/// - addresses come back in file order, duplicates dropped
/// - with `AI_CANONNAME`, the official name of the first matching line is
///   set on the first record only
#[derive(Debug, Clone, Default)]
pub struct HostsFileResolver {
    lines: Vec<HostsLine>,
}

impl HostsFileResolver {
    /// Parse hosts-file text. Lines whose address does not parse are skipped.
    pub fn parse(content: &str) -> Self {
        let mut lines = Vec::new();
        for raw in content.lines() {
            let data = raw.split('#').next().unwrap_or_default();
            let mut fields = data.split_whitespace();
            let Some(addr_text) = fields.next() else {
                continue;
            };
            let names: Vec<String> = fields.map(str::to_string).collect();
            if names.is_empty() {
                continue;
            }
            match addr_text.parse::<IpAddr>() {
                Ok(addr) => lines.push(HostsLine { addr, names }),
                Err(_) => tracing::trace!(line = %raw, "skipping unparsable hosts line"),
            }
        }
        Self { lines }
    }

    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Load the system hosts file.
    pub fn system() -> io::Result<Self> {
        Self::from_path(SYSTEM_HOSTS)
    }

    /// Number of usable lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn family_of(addr: &IpAddr) -> AddressFamily {
    match addr {
        IpAddr::V4(_) => AddressFamily::Inet,
        IpAddr::V6(_) => AddressFamily::Inet6,
    }
}

impl Resolve for HostsFileResolver {
    fn resolve(&self, query: &ResolutionQuery) -> Result<AddrInfoList, GaiError> {
        let host = query.name().as_str();
        if host.contains('\0') {
            return Err(GaiError::InvalidName);
        }
        let families = query.hints().map(|h| h.families).unwrap_or(FamilyMask::ANY);

        let mut official: Option<&str> = None;
        let mut addrs: Vec<IpAddr> = Vec::new();
        for line in &self.lines {
            if !line.names.iter().any(|n| n.eq_ignore_ascii_case(host)) {
                continue;
            }
            if !families.allows(family_of(&line.addr)) {
                continue;
            }
            official.get_or_insert(line.names[0].as_str());
            if !addrs.contains(&line.addr) {
                addrs.push(line.addr);
            }
        }

        if addrs.is_empty() {
            tracing::debug!(host = %host, "no hosts entry");
            return Err(GaiError::NoName);
        }

        let mut records: Vec<ResolutionRecord<'static>> = addrs
            .into_iter()
            .map(|addr| match addr {
                IpAddr::V4(v4) => ResolutionRecord::ipv4(v4),
                IpAddr::V6(v6) => ResolutionRecord::ipv6(v6),
            })
            .collect();

        if query.wants_canonical_name() {
            if let (Some(first), Some(name)) = (records.first_mut(), official) {
                *first = first.clone().with_canonical_name(name);
            }
        }

        tracing::debug!(host = %host, count = records.len(), "hosts lookup complete");
        Ok(AddrInfoList::from_records(records))
    }
}
