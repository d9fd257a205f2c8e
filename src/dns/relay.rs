//! Trust-boundary relay.
//!
//! The protected side has no resolver of its own. A [`HostRelay`] runs the
//! query on a host resolver, copies every record across the boundary
//! (family, raw address bytes, canonical name, order), releases the host's
//! list immediately, and hands the protected side a list it owns outright.
//!
//! The relay also keeps count of how many relayed lists are still alive.
//! Every list must be released before its scenario returns; the count makes
//! a leak visible, and `max_outstanding` turns one into a hard failure.

use super::addrinfo::{AddrInfoList, ResolutionQuery, ResolutionRecord};
use super::resolve::Resolve;
use crate::base::gaierror::GaiError;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Relays queries to a host resolver and marshals the answers back.
#[derive(Debug)]
pub struct HostRelay<R> {
    host: R,
    outstanding: Arc<AtomicUsize>,
    max_outstanding: Option<usize>,
}

impl<R: Resolve> HostRelay<R> {
    pub fn new(host: R) -> Self {
        Self {
            host,
            outstanding: Arc::new(AtomicUsize::new(0)),
            max_outstanding: None,
        }
    }

    /// Refuse to relay while `limit` lists are still unreleased.
    pub fn with_max_outstanding(mut self, limit: usize) -> Self {
        self.max_outstanding = Some(limit);
        self
    }

    /// Relayed lists that have not been dropped yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }
}

impl<R: Resolve> Resolve for HostRelay<R> {
    fn resolve(&self, query: &ResolutionQuery) -> Result<AddrInfoList, GaiError> {
        if let Some(limit) = self.max_outstanding {
            let live = self.outstanding();
            if live >= limit {
                tracing::error!(live, limit, "relay allocation budget exhausted");
                return Err(GaiError::Memory);
            }
        }

        let host_list = self.host.resolve(query).inspect_err(|e| {
            tracing::debug!(host = %query.name(), error = %e, "host resolver failed");
        })?;

        let records: Vec<ResolutionRecord<'static>> =
            host_list.records().map(ResolutionRecord::into_owned).collect();
        drop(host_list);

        tracing::debug!(
            host = %query.name(),
            count = records.len(),
            "relayed records across boundary"
        );

        self.outstanding.fetch_add(1, Ordering::SeqCst);
        let outstanding = self.outstanding.clone();
        Ok(AddrInfoList::from_records(records).on_release(move || {
            outstanding.fetch_sub(1, Ordering::SeqCst);
            tracing::trace!("relayed list released");
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::{HostsFileResolver, Override, ResolverWithOverrides};
    use std::{
        borrow::Cow,
        collections::HashMap,
        net::{Ipv4Addr, Ipv6Addr},
    };

    struct CountingHost {
        released: Arc<AtomicUsize>,
        records: Vec<ResolutionRecord<'static>>,
    }

    impl Resolve for CountingHost {
        fn resolve(&self, _query: &ResolutionQuery) -> Result<AddrInfoList, GaiError> {
            let released = self.released.clone();
            Ok(AddrInfoList::from_records(self.records.clone()).on_release(move || {
                released.fetch_add(1, Ordering::SeqCst);
            }))
        }
    }

    #[test]
    fn test_relay_copies_records_faithfully() {
        let records = vec![
            ResolutionRecord::ipv6(Ipv6Addr::LOCALHOST).with_canonical_name("localhost"),
            ResolutionRecord::other(libc::AF_UNIX),
            ResolutionRecord::ipv4(Ipv4Addr::LOCALHOST),
        ];
        let released = Arc::new(AtomicUsize::new(0));
        let relay = HostRelay::new(CountingHost {
            released: released.clone(),
            records: records.clone(),
        });

        let list = relay
            .resolve(&ResolutionQuery::new("localhost", None))
            .unwrap();

        // Host list is gone before the protected side even looks.
        assert_eq!(released.load(Ordering::SeqCst), 1);
        let relayed: Vec<_> = list.records().map(ResolutionRecord::into_owned).collect();
        assert_eq!(relayed, records);
    }

    #[test]
    fn test_outstanding_tracks_drops() {
        let relay = HostRelay::new(HostsFileResolver::parse("127.0.0.1 localhost\n"));
        let query = ResolutionQuery::new("localhost", None);

        let first = relay.resolve(&query).unwrap();
        let second = relay.resolve(&query).unwrap();
        assert_eq!(relay.outstanding(), 2);

        drop(first);
        assert_eq!(relay.outstanding(), 1);
        drop(second);
        assert_eq!(relay.outstanding(), 0);
    }

    #[test]
    fn test_budget_exhaustion() {
        let relay =
            HostRelay::new(HostsFileResolver::parse("127.0.0.1 localhost\n")).with_max_outstanding(1);
        let query = ResolutionQuery::new("localhost", None);

        let held = relay.resolve(&query).unwrap();
        assert_eq!(relay.resolve(&query).unwrap_err(), GaiError::Memory);

        drop(held);
        assert!(relay.resolve(&query).is_ok());
        assert_eq!(relay.outstanding(), 0);
    }

    #[test]
    fn test_host_failure_is_passed_through() {
        let mut overrides = HashMap::new();
        overrides.insert(Cow::Borrowed("localhost"), Override::Fail(GaiError::NoName));
        let host = ResolverWithOverrides::new(
            Arc::new(HostsFileResolver::default()),
            overrides,
        );
        let relay = HostRelay::new(host);

        let err = relay
            .resolve(&ResolutionQuery::new("localhost", None))
            .unwrap_err();
        assert_eq!(err, GaiError::NoName);
        assert_eq!(relay.outstanding(), 0);
    }
}
