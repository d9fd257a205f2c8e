//! Ergonomic error context helpers.
//!
//! Provides an extension trait for turning resolver-level `GaiError`s into
//! context-rich `OracleError` variants.

use crate::base::gaierror::GaiError;
use crate::base::oracleerror::OracleError;

/// Extension trait for adding context to resolver Results.
pub trait GaiResultExt<T> {
    /// Attach the hostname that was being resolved.
    ///
    /// # Example
    /// ```ignore
    /// use gaioracle::base::context::GaiResultExt;
    ///
    /// let list = resolver.resolve(&query).resolution_context("localhost")?;
    /// // Error: "getaddrinfo() system call failed"
    /// ```
    fn resolution_context(self, hostname: &str) -> Result<T, OracleError>;
}

impl<T> GaiResultExt<T> for Result<T, GaiError> {
    fn resolution_context(self, hostname: &str) -> Result<T, OracleError> {
        self.map_err(|source| OracleError::ResolutionFailed {
            hostname: hostname.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_resolution_context() {
        let result: Result<(), GaiError> = Err(GaiError::NoName);
        let err = result.resolution_context("localhost").unwrap_err();

        match &err {
            OracleError::ResolutionFailed { hostname, source } => {
                assert_eq!(hostname, "localhost");
                assert_eq!(*source, GaiError::NoName);
            }
            _ => panic!("Expected ResolutionFailed"),
        }
        assert_eq!(err.to_string(), "getaddrinfo() system call failed");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_resolution_context_passes_ok_through() {
        let result: Result<u8, GaiError> = Ok(7);
        assert_eq!(result.resolution_context("localhost").unwrap(), 7);
    }
}
