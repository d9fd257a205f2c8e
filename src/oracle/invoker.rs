//! Issues the scenario's single resolution call.

use crate::base::context::GaiResultExt;
use crate::base::oracleerror::OracleError;
use crate::dns::{AddrInfoList, Resolve, ResolutionQuery};

/// Run `query` once against `resolver`.
///
/// The returned list is owned by the caller for the rest of the scenario and
/// is released when it drops. Failures are not retried: resolving the
/// loopback name is deterministic, so a second attempt would not fix a
/// broken resolver.
pub fn invoke<R: Resolve + ?Sized>(
    resolver: &R,
    query: &ResolutionQuery,
) -> Result<AddrInfoList, OracleError> {
    let host = query.name().as_str();
    tracing::debug!(host = %host, hinted = query.hints().is_some(), "invoking resolver");

    let list = resolver
        .resolve(query)
        .inspect_err(|e| tracing::error!(host = %host, error = %e, "resolution failed"))
        .resolution_context(host)?;

    tracing::debug!(host = %host, count = list.len(), "resolution complete");
    Ok(list)
}
