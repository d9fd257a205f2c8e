//! Core resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the seam between the oracle and whatever actually answers `getaddrinfo`.

use super::addrinfo::{AddrInfoList, ResolutionQuery, ResolutionRecord};
use crate::base::gaierror::GaiError;
use std::{borrow::Cow, collections::HashMap, fmt, sync::Arc};

/// A hostname to resolve.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass names to resolvers.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Trait for `getaddrinfo`-style resolution.
///
/// # Design Notes
///
/// - Resolution is synchronous: the call blocks until the resolver answers.
///   There is no timeout and no cancellation.
/// - Uses `&self` so one resolver can serve repeated scenarios.
/// - On success the caller receives exclusive ownership of the result list;
///   dropping it is the only way the records are released.
pub trait Resolve: Send + Sync {
    /// Resolves a query to its result list, or the resolver's failure status.
    fn resolve(&self, query: &ResolutionQuery) -> Result<AddrInfoList, GaiError>;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, query: &ResolutionQuery) -> Result<AddrInfoList, GaiError> {
        (**self).resolve(query)
    }
}

/// What an overridden hostname resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    /// Answer with exactly these records, in this order.
    Records(Vec<ResolutionRecord<'static>>),
    /// Fail the call with this status.
    Fail(GaiError),
}

/// Resolver wrapper that supports hostname overrides.
///
/// This resolver first checks a map of hostname overrides before falling
/// back to the underlying resolver. Useful for:
/// - Injecting faults (a failing status, a wrong address) into a scenario
/// - Testing without a working system resolver
///
/// # Example
///
/// ```rust,ignore
/// use gaioracle::dns::{GaiResolver, Override, ResolutionRecord, ResolverWithOverrides};
/// use std::collections::HashMap;
///
/// let mut overrides = HashMap::new();
/// overrides.insert(
///     "localhost".into(),
///     Override::Records(vec![ResolutionRecord::ipv4("10.0.0.1".parse().unwrap())]),
/// );
///
/// let resolver = ResolverWithOverrides::new(Arc::new(GaiResolver::new()), overrides);
/// ```
pub struct ResolverWithOverrides {
    inner: Arc<dyn Resolve>,
    overrides: Arc<HashMap<Cow<'static, str>, Override>>,
}

impl ResolverWithOverrides {
    /// Creates a new resolver with the given overrides.
    ///
    /// # Arguments
    ///
    /// * `inner` - The fallback resolver for non-overridden hostnames.
    /// * `overrides` - Map of hostnames to their forced answers.
    pub fn new(inner: Arc<dyn Resolve>, overrides: HashMap<Cow<'static, str>, Override>) -> Self {
        Self {
            inner,
            overrides: Arc::new(overrides),
        }
    }

    /// Returns the number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Resolve for ResolverWithOverrides {
    fn resolve(&self, query: &ResolutionQuery) -> Result<AddrInfoList, GaiError> {
        match self.overrides.get(query.name().as_str()) {
            Some(Override::Records(records)) => {
                tracing::debug!(host = %query.name(), count = records.len(), "answering from override");
                Ok(AddrInfoList::from_records(records.clone()))
            }
            Some(Override::Fail(err)) => {
                tracing::debug!(host = %query.name(), error = %err, "failing from override");
                Err(err.clone())
            }
            None => self.inner.resolve(query),
        }
    }
}

impl fmt::Debug for ResolverWithOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverWithOverrides")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}
