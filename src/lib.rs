//! # gaioracle
//!
//! A correctness oracle for `getaddrinfo` when the call is relayed from a
//! protected environment to an untrusted host.
//!
//! The oracle resolves the loopback name `localhost` in one of two fixed
//! scenarios and checks what comes back:
//!
//! - **no hints**: every IPv4 record must be `127.0.0.1`, every IPv6 record
//!   `::1`, anything else is ignored
//! - **hints** (IPv4|IPv6, stream sockets, `AI_CANONNAME`): the same address
//!   checks, plus every canonical name present must contain `localhost`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gaioracle::dns::{GaiResolver, HostRelay};
//! use gaioracle::oracle::{AddrInfoOracle, AddrinfoTestInput};
//!
//! let oracle = AddrInfoOracle::new(HostRelay::new(GaiResolver::new()));
//! let status = oracle.run(&AddrinfoTestInput::new(false));
//! println!("{status}");
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Status codes, error taxonomy and scenario state
//! - [`dns`] - The resolution data model, the `Resolve` seam and resolvers
//! - [`oracle`] - Scenario selection, invocation and verification

pub mod base;
pub mod dns;
pub mod oracle;
