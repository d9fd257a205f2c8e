//! System resolver using getaddrinfo.
//!
//! This resolver calls the C library's `getaddrinfo` directly rather than
//! going through `ToSocketAddrs`, because the oracle needs the parts of the
//! result the standard library throws away: the canonical name, the exact
//! family tags and the raw sockaddr bytes.
//!
//! # When to Use
//!
//! - As the host side of a [`HostRelay`](super::HostRelay)
//! - Directly, when checking the local C library itself

use super::addrinfo::{AddrInfoList, ResolutionQuery, ResolutionRecord};
use super::resolve::Resolve;
use crate::base::gaierror::GaiError;
use std::{
    ffi::{CStr, CString},
    marker::PhantomData,
    mem::size_of,
    ptr,
};

/// System resolver backed by libc `getaddrinfo`.
///
/// The call blocks the current thread until the system resolver answers.
#[derive(Clone, Debug, Default)]
pub struct GaiResolver;

impl GaiResolver {
    /// Creates a new `GaiResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, query: &ResolutionQuery) -> Result<AddrInfoList, GaiError> {
        let host = query.name().as_str();
        let node = CString::new(host).map_err(|_| GaiError::InvalidName)?;

        // SAFETY: all-zero is a valid addrinfo (null pointers, zero lengths).
        let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
        let hints_ptr: *const libc::addrinfo = match query.hints() {
            Some(h) => {
                hints.ai_family = h.families.as_ai_family();
                hints.ai_socktype = h.socket_type.as_raw();
                hints.ai_flags = h.flags.bits();
                &hints
            }
            None => ptr::null(),
        };

        tracing::debug!(host = %host, hinted = !hints_ptr.is_null(), "resolving via getaddrinfo");

        let mut res: *mut libc::addrinfo = ptr::null_mut();
        // SAFETY: node is a valid C string, hints_ptr is null or points at a
        // live addrinfo, and res is a valid out-pointer.
        let status = unsafe { libc::getaddrinfo(node.as_ptr(), ptr::null(), hints_ptr, &mut res) };
        if status != 0 {
            let err = GaiError::from_code(status);
            tracing::debug!(host = %host, status, error = %err, "getaddrinfo failed");
            if !res.is_null() {
                // SAFETY: some resolvers hand back a partial list on failure;
                // it is still ours to free.
                unsafe { libc::freeaddrinfo(res) };
            }
            return Err(err);
        }

        let list = AddrInfoList::from_native(NativeAddrInfo { head: res });
        tracing::debug!(host = %host, count = list.len(), "getaddrinfo complete");
        Ok(list)
    }
}

/// Ownership of a `getaddrinfo`-allocated linked list.
pub(crate) struct NativeAddrInfo {
    head: *mut libc::addrinfo,
}

impl NativeAddrInfo {
    pub(crate) fn cursor(&self) -> NativeCursor<'_> {
        NativeCursor {
            next: self.head,
            _list: PhantomData,
        }
    }
}

impl Drop for NativeAddrInfo {
    fn drop(&mut self) {
        if self.head.is_null() {
            return;
        }
        // SAFETY: head came from a successful getaddrinfo and is freed
        // exactly once, here.
        unsafe { libc::freeaddrinfo(self.head) };
        self.head = ptr::null_mut();
        tracing::trace!("freeaddrinfo released native list");
    }
}

/// Walks `ai_next` links, decoding each node into a [`ResolutionRecord`].
pub(crate) struct NativeCursor<'a> {
    next: *const libc::addrinfo,
    _list: PhantomData<&'a NativeAddrInfo>,
}

impl<'a> Iterator for NativeCursor<'a> {
    type Item = ResolutionRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }
        // SAFETY: the node belongs to a list kept alive by the borrowed
        // NativeAddrInfo for 'a.
        let node: &'a libc::addrinfo = unsafe { &*self.next };
        self.next = node.ai_next;
        // SAFETY: same list, same lifetime.
        Some(unsafe { decode_node(node) })
    }
}

unsafe fn decode_node<'a>(node: &'a libc::addrinfo) -> ResolutionRecord<'a> {
    let canonical_name = if node.ai_canonname.is_null() {
        None
    } else {
        // SAFETY: ai_canonname is a NUL-terminated string owned by the node.
        Some(unsafe { CStr::from_ptr(node.ai_canonname) }.to_string_lossy())
    };
    let addr_len = node.ai_addrlen as usize;

    match node.ai_family {
        libc::AF_INET if !node.ai_addr.is_null() && addr_len >= size_of::<libc::sockaddr_in>() => {
            // SAFETY: family and length say this is a sockaddr_in.
            let sin = unsafe { &*node.ai_addr.cast::<libc::sockaddr_in>() };
            ResolutionRecord::V4 {
                // s_addr is stored in network order, so its in-memory bytes
                // are already the dotted-quad octets.
                octets: sin.sin_addr.s_addr.to_ne_bytes(),
                canonical_name,
            }
        }
        libc::AF_INET6
            if !node.ai_addr.is_null() && addr_len >= size_of::<libc::sockaddr_in6>() =>
        {
            // SAFETY: family and length say this is a sockaddr_in6.
            let sin6 = unsafe { &*node.ai_addr.cast::<libc::sockaddr_in6>() };
            ResolutionRecord::V6 {
                octets: sin6.sin6_addr.s6_addr,
                canonical_name,
            }
        }
        family => {
            if family == libc::AF_INET || family == libc::AF_INET6 {
                tracing::warn!(family, addr_len, "sockaddr too short for family, skipping");
            }
            ResolutionRecord::Other {
                family,
                canonical_name,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::{AddrInfoHints, AddressFamily, AiFlags, FamilyMask, SocketType};
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_interior_nul_is_rejected() {
        let resolver = GaiResolver::new();
        let result = resolver.resolve(&ResolutionQuery::new("local\0host", None));
        assert_eq!(result.unwrap_err(), GaiError::InvalidName);
    }

    #[test]
    fn test_numeric_ipv4_host() {
        let resolver = GaiResolver::new();
        let hints = AddrInfoHints {
            families: FamilyMask::IPV4,
            socket_type: SocketType::Stream,
            flags: AiFlags::NONE,
        };
        let list = resolver
            .resolve(&ResolutionQuery::new("127.0.0.1", Some(hints)))
            .expect("numeric host should always resolve");

        assert!(list.is_native());
        let records: Vec<_> = list.records().collect();
        assert!(!records.is_empty());
        for record in records {
            match record {
                ResolutionRecord::V4 { octets, .. } => {
                    assert_eq!(Ipv4Addr::from(octets), Ipv4Addr::LOCALHOST)
                }
                other => panic!("unexpected record {other:?}"),
            }
        }
    }

    #[test]
    fn test_numeric_ipv6_host() {
        let resolver = GaiResolver::new();
        let hints = AddrInfoHints {
            families: FamilyMask::IPV6,
            socket_type: SocketType::Stream,
            flags: AiFlags::NONE,
        };
        // Hosts without IPv6 support may refuse this; only check what comes back.
        if let Ok(list) = resolver.resolve(&ResolutionQuery::new("::1", Some(hints))) {
            for record in list.records() {
                assert_eq!(record.family(), Some(AddressFamily::Inet6));
                if let ResolutionRecord::V6 { octets, .. } = record {
                    assert_eq!(Ipv6Addr::from(octets), Ipv6Addr::LOCALHOST);
                }
            }
        }
    }

    #[test]
    fn test_gai_resolver_localhost() {
        let resolver = GaiResolver::new();
        let result = resolver.resolve(&ResolutionQuery::new("localhost", None));

        // localhost should always resolve, but a stripped-down sandbox may
        // lack even /etc/hosts.
        match result {
            Ok(list) => assert!(!list.is_empty()),
            Err(e) => println!("GaiResolver failed for localhost: {e}"),
        }
    }
}
