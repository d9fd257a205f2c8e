//! The `getaddrinfo` data model.
//!
//! A resolution produces an [`AddrInfoList`]: a single owning handle over a
//! finite, forward-only sequence of [`ResolutionRecord`]s. The handle is the
//! only way to reach the records, and records borrowed from it cannot outlive
//! it. Dropping the handle releases the underlying storage exactly once.

use super::gai::{NativeAddrInfo, NativeCursor};
use super::resolve::Name;
use serde::Serialize;
use std::{
    borrow::Cow,
    ffi::c_int,
    fmt,
    iter::FusedIterator,
    net::{Ipv4Addr, Ipv6Addr},
};

/// Address families the oracle understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressFamily {
    Inet,
    Inet6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Inet => f.write_str("IPv4"),
            AddressFamily::Inet6 => f.write_str("IPv6"),
        }
    }
}

/// Set of address families a query is limited to.
///
/// `getaddrinfo` has no way to spell "IPv4 or IPv6" other than leaving the
/// family unspecified, so the combined mask maps to `AF_UNSPEC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FamilyMask {
    ipv4: bool,
    ipv6: bool,
}

impl FamilyMask {
    pub const IPV4: FamilyMask = FamilyMask {
        ipv4: true,
        ipv6: false,
    };
    pub const IPV6: FamilyMask = FamilyMask {
        ipv4: false,
        ipv6: true,
    };
    pub const ANY: FamilyMask = FamilyMask {
        ipv4: true,
        ipv6: true,
    };

    pub fn allows(&self, family: AddressFamily) -> bool {
        match family {
            AddressFamily::Inet => self.ipv4,
            AddressFamily::Inet6 => self.ipv6,
        }
    }

    /// The `ai_family` value to hand to the system resolver.
    pub fn as_ai_family(&self) -> c_int {
        match (self.ipv4, self.ipv6) {
            (true, false) => libc::AF_INET,
            (false, true) => libc::AF_INET6,
            _ => libc::AF_UNSPEC,
        }
    }
}

impl std::ops::BitOr for FamilyMask {
    type Output = FamilyMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        FamilyMask {
            ipv4: self.ipv4 || rhs.ipv4,
            ipv6: self.ipv6 || rhs.ipv6,
        }
    }
}

/// `ai_socktype` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SocketType {
    #[default]
    Any,
    Stream,
    Datagram,
    Raw,
}

impl SocketType {
    pub fn as_raw(&self) -> c_int {
        match self {
            SocketType::Any => 0,
            SocketType::Stream => libc::SOCK_STREAM,
            SocketType::Datagram => libc::SOCK_DGRAM,
            SocketType::Raw => libc::SOCK_RAW,
        }
    }
}

/// `ai_flags` hint bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AiFlags(c_int);

impl AiFlags {
    pub const NONE: AiFlags = AiFlags(0);
    /// Ask the resolver to fill in `ai_canonname`.
    pub const CANONNAME: AiFlags = AiFlags(libc::AI_CANONNAME);

    pub fn contains(&self, other: AiFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(&self) -> c_int {
        self.0
    }
}

impl std::ops::BitOr for AiFlags {
    type Output = AiFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        AiFlags(self.0 | rhs.0)
    }
}

/// Constraints passed alongside a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddrInfoHints {
    pub families: FamilyMask,
    pub socket_type: SocketType,
    pub flags: AiFlags,
}

impl AddrInfoHints {
    pub fn wants_canonical_name(&self) -> bool {
        self.flags.contains(AiFlags::CANONNAME)
    }
}

impl Default for AddrInfoHints {
    fn default() -> Self {
        Self {
            families: FamilyMask::ANY,
            socket_type: SocketType::Any,
            flags: AiFlags::NONE,
        }
    }
}

/// One address-resolution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionQuery {
    name: Name,
    hints: Option<AddrInfoHints>,
}

impl ResolutionQuery {
    pub fn new(name: impl Into<Name>, hints: Option<AddrInfoHints>) -> Self {
        Self {
            name: name.into(),
            hints,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn hints(&self) -> Option<&AddrInfoHints> {
        self.hints.as_ref()
    }

    pub fn wants_canonical_name(&self) -> bool {
        self.hints.is_some_and(|h| h.wants_canonical_name())
    }
}

/// A single entry of a resolution result, discriminated by family.
///
/// Borrowed records (`'a` tied to an [`AddrInfoList`]) come out of
/// [`AddrInfoList::records`]; owned records (`'static`) are what a relay
/// marshals and what test fixtures are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionRecord<'a> {
    V4 {
        octets: [u8; 4],
        canonical_name: Option<Cow<'a, str>>,
    },
    V6 {
        octets: [u8; 16],
        canonical_name: Option<Cow<'a, str>>,
    },
    /// A family outside IPv4/IPv6. Carried through, never interpreted.
    Other {
        family: c_int,
        canonical_name: Option<Cow<'a, str>>,
    },
}

impl ResolutionRecord<'static> {
    pub fn ipv4(addr: Ipv4Addr) -> Self {
        ResolutionRecord::V4 {
            octets: addr.octets(),
            canonical_name: None,
        }
    }

    pub fn ipv6(addr: Ipv6Addr) -> Self {
        ResolutionRecord::V6 {
            octets: addr.octets(),
            canonical_name: None,
        }
    }

    pub fn other(family: c_int) -> Self {
        ResolutionRecord::Other {
            family,
            canonical_name: None,
        }
    }

    pub fn with_canonical_name(mut self, name: impl Into<String>) -> Self {
        *self.canonical_name_slot() = Some(Cow::Owned(name.into()));
        self
    }
}

impl<'a> ResolutionRecord<'a> {
    pub fn family(&self) -> Option<AddressFamily> {
        match self {
            ResolutionRecord::V4 { .. } => Some(AddressFamily::Inet),
            ResolutionRecord::V6 { .. } => Some(AddressFamily::Inet6),
            ResolutionRecord::Other { .. } => None,
        }
    }

    pub fn canonical_name(&self) -> Option<&str> {
        match self {
            ResolutionRecord::V4 { canonical_name, .. }
            | ResolutionRecord::V6 { canonical_name, .. }
            | ResolutionRecord::Other { canonical_name, .. } => canonical_name.as_deref(),
        }
    }

    /// A borrowed view of this record with the same bytes and name.
    pub fn as_borrowed(&self) -> ResolutionRecord<'_> {
        let name = self.canonical_name().map(Cow::Borrowed);
        match self {
            ResolutionRecord::V4 { octets, .. } => ResolutionRecord::V4 {
                octets: *octets,
                canonical_name: name,
            },
            ResolutionRecord::V6 { octets, .. } => ResolutionRecord::V6 {
                octets: *octets,
                canonical_name: name,
            },
            ResolutionRecord::Other { family, .. } => ResolutionRecord::Other {
                family: *family,
                canonical_name: name,
            },
        }
    }

    /// Detach from the list this record was borrowed from.
    pub fn into_owned(self) -> ResolutionRecord<'static> {
        match self {
            ResolutionRecord::V4 {
                octets,
                canonical_name,
            } => ResolutionRecord::V4 {
                octets,
                canonical_name: canonical_name.map(|n| Cow::Owned(n.into_owned())),
            },
            ResolutionRecord::V6 {
                octets,
                canonical_name,
            } => ResolutionRecord::V6 {
                octets,
                canonical_name: canonical_name.map(|n| Cow::Owned(n.into_owned())),
            },
            ResolutionRecord::Other {
                family,
                canonical_name,
            } => ResolutionRecord::Other {
                family,
                canonical_name: canonical_name.map(|n| Cow::Owned(n.into_owned())),
            },
        }
    }

    fn canonical_name_slot(&mut self) -> &mut Option<Cow<'a, str>> {
        match self {
            ResolutionRecord::V4 { canonical_name, .. }
            | ResolutionRecord::V6 { canonical_name, .. }
            | ResolutionRecord::Other { canonical_name, .. } => canonical_name,
        }
    }
}

enum Storage {
    Native(NativeAddrInfo),
    Marshalled(Vec<ResolutionRecord<'static>>),
}

/// Owning handle over one resolution result.
///
/// Dropping the handle releases the records (calling `freeaddrinfo` for a
/// native list) and then runs the release hook, if one was attached.
pub struct AddrInfoList {
    storage: Storage,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl AddrInfoList {
    /// A list whose records were copied out of another resolver.
    pub fn from_records(records: Vec<ResolutionRecord<'static>>) -> Self {
        Self {
            storage: Storage::Marshalled(records),
            on_release: None,
        }
    }

    pub(crate) fn from_native(native: NativeAddrInfo) -> Self {
        Self {
            storage: Storage::Native(native),
            on_release: None,
        }
    }

    /// Run `hook` once, after the records have been released.
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        let previous = self.on_release.take();
        self.on_release = Some(Box::new(move || {
            if let Some(previous) = previous {
                previous();
            }
            hook();
        }));
        self
    }

    /// Walk the records front to back.
    pub fn records(&self) -> Records<'_> {
        let inner = match &self.storage {
            Storage::Native(native) => RecordsInner::Native(native.cursor()),
            Storage::Marshalled(records) => RecordsInner::Marshalled(records.iter()),
        };
        Records { inner }
    }

    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.records().next().is_none()
    }

    pub fn is_native(&self) -> bool {
        matches!(self.storage, Storage::Native(_))
    }
}

impl Drop for AddrInfoList {
    fn drop(&mut self) {
        let storage = std::mem::replace(&mut self.storage, Storage::Marshalled(Vec::new()));
        drop(storage);
        if let Some(hook) = self.on_release.take() {
            hook();
        }
    }
}

impl fmt::Debug for AddrInfoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddrInfoList")
            .field("native", &self.is_native())
            .field("records", &self.len())
            .finish_non_exhaustive()
    }
}

enum RecordsInner<'a> {
    Native(NativeCursor<'a>),
    Marshalled(std::slice::Iter<'a, ResolutionRecord<'static>>),
}

/// Forward-only iterator over the records of an [`AddrInfoList`].
pub struct Records<'a> {
    inner: RecordsInner<'a>,
}

impl<'a> Iterator for Records<'a> {
    type Item = ResolutionRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            RecordsInner::Native(cursor) => cursor.next(),
            RecordsInner::Marshalled(iter) => iter.next().map(|r| r.as_borrowed()),
        }
    }
}

impl FusedIterator for Records<'_> {}
