//! Unified error type for the storage and use-case layers.

use serde_json::Value;

/// Things that can go wrong while serving a request.
///
/// `NotFound` and `Conflict` are domain outcomes introduced by the use-case
/// layer; the `Storage*` variants come from the file store and propagate
/// unchanged all the way to the HTTP boundary (no retries, no conversion).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested record does not exist. Carries the lookup key used.
    NotFound {
        /// Machine-readable code for the wire contract (e.g. `UserNotFound`).
        code: &'static str,
        /// Human-readable message.
        message: String,
        /// Structured context, typically the lookup key.
        details: Option<Value>,
    },
    /// A uniqueness constraint would be violated. Carries the offending value.
    Conflict {
        /// Machine-readable code for the wire contract (e.g. `EmailAlreadyExists`).
        code: &'static str,
        /// Human-readable message.
        message: String,
        /// Structured context, typically the conflicting value.
        details: Option<Value>,
    },
    /// File system problem (read, write, rename).
    StorageIo(String),
    /// The persisted document is not valid JSON, or failed to serialize.
    StorageCorrupt(String),
    /// The backing file is missing and no initial document was configured.
    StorageUnavailable(String),
}

impl Error {
    /// Not-found domain failure with a machine code and the lookup key.
    pub fn not_found(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Error::NotFound {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// Conflict domain failure with a machine code and the offending value.
    pub fn conflict(code: &'static str, message: impl Into<String>, details: Value) -> Self {
        Error::Conflict {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// Stable machine-readable code for the wire error contract.
    pub fn code(&self) -> &str {
        match self {
            Error::NotFound { code, .. } | Error::Conflict { code, .. } => code,
            Error::StorageIo(_) => "StorageIOError",
            Error::StorageCorrupt(_) => "StorageCorrupt",
            Error::StorageUnavailable(_) => "StorageUnavailable",
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound { message, .. } => write!(f, "not found: {message}"),
            Error::Conflict { message, .. } => write!(f, "conflict: {message}"),
            Error::StorageIo(msg) => write!(f, "storage i/o error: {msg}"),
            Error::StorageCorrupt(msg) => write!(f, "storage corrupt: {msg}"),
            Error::StorageUnavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StorageIo(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::StorageIo(err.to_string())
        } else {
            Error::StorageCorrupt(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
