//! Resolver-level failures, mirroring the `EAI_*` status space of
//! `getaddrinfo`.

use std::ffi::{c_int, CStr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GaiError {
    #[error("Hostname contains an interior NUL byte")]
    InvalidName,
    #[error("Name or service not known")]
    NoName,
    #[error("Address family not supported")]
    Family,
    #[error("Memory allocation failure")]
    Memory,
    #[error("getaddrinfo status {code}: {message}")]
    System { code: i32, message: String },
}

impl GaiError {
    /// The `EAI_*` value this error corresponds to.
    pub fn code(&self) -> i32 {
        match self {
            GaiError::InvalidName | GaiError::NoName => libc::EAI_NONAME,
            GaiError::Family => libc::EAI_FAMILY,
            GaiError::Memory => libc::EAI_MEMORY,
            GaiError::System { code, .. } => *code,
        }
    }

    /// Map a non-zero `getaddrinfo` return value.
    pub fn from_code(code: i32) -> Self {
        match code {
            libc::EAI_NONAME => GaiError::NoName,
            libc::EAI_FAMILY => GaiError::Family,
            libc::EAI_MEMORY => GaiError::Memory,
            _ => GaiError::System {
                code,
                message: describe(code),
            },
        }
    }
}

fn describe(code: c_int) -> String {
    // SAFETY: gai_strerror returns a pointer to a static, NUL-terminated
    // string for every input value (unknown codes map to a generic message).
    let text = unsafe { libc::gai_strerror(code) };
    if text.is_null() {
        return format!("unknown getaddrinfo error {code}");
    }
    // SAFETY: non-null pointer from gai_strerror, see above.
    unsafe { CStr::from_ptr(text) }
        .to_string_lossy()
        .into_owned()
}
