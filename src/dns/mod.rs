//! Address Resolution Module
//!
//! Provides pluggable `getaddrinfo`-style resolution:
//! - System resolver (libc `getaddrinfo` / `freeaddrinfo`)
//! - Hosts-file resolver with fully deterministic answers
//! - A trust-boundary relay that marshals host answers into owned lists
//! - Hostname override mechanism for fault injection
//!
//! # Architecture
//!
//! The `Resolve` trait is the seam. Whatever sits behind it hands back an
//! [`AddrInfoList`], the single owning handle over the result records;
//! records are read through a forward-only iterator and released when the
//! handle drops.
//!
//! # Example
//!
//! ```rust,ignore
//! use gaioracle::dns::{GaiResolver, HostRelay, Resolve, ResolutionQuery};
//!
//! let relay = HostRelay::new(GaiResolver::new());
//! let list = relay.resolve(&ResolutionQuery::new("localhost", None))?;
//! for record in list.records() {
//!     println!("{:?}", record);
//! }
//! ```

mod addrinfo;
mod gai;
mod hosts;
mod relay;
mod resolve;

pub use addrinfo::{
    AddrInfoHints, AddrInfoList, AddressFamily, AiFlags, FamilyMask, Records, ResolutionQuery,
    ResolutionRecord, SocketType,
};
pub use gai::GaiResolver;
pub use hosts::HostsFileResolver;
pub use relay::HostRelay;
pub use resolve::{Name, Override, Resolve, ResolverWithOverrides};
