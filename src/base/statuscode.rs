use serde::Serialize;
use std::fmt;

/// Coarse status codes reported back to the harness.
///
/// Numeric values follow the canonical RPC error space, so a harness that
/// speaks `google.rpc.Code` can interpret them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Ok,
    InvalidArgument,
    Internal,

    Unknown(i32),
}

impl StatusCode {
    pub fn as_i32(&self) -> i32 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::InvalidArgument => 3,
            StatusCode::Internal => 13,
            StatusCode::Unknown(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::Internal => "INTERNAL",
            StatusCode::Unknown(_) => "UNKNOWN",
        }
    }
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        match code {
            0 => StatusCode::Ok,
            3 => StatusCode::InvalidArgument,
            13 => StatusCode::Internal,
            _ => StatusCode::Unknown(code),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Unknown(code) => write!(f, "UNKNOWN({code})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// The single value an oracle run hands back: a code plus a human-readable
/// message. An `Ok` status carries an empty message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    code: StatusCode,
    message: String,
}

impl Status {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::Ok, String::new())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(StatusCode::InvalidArgument, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::Internal, message)
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_ok(&self) -> bool {
        self.code == StatusCode::Ok
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::ok()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            fmt::Display::fmt(&self.code, f)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}
