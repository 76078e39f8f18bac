//! Shared result and error taxonomy for all backends.
//!
//! Every adapter maps its native failure surface into [`BridgeError`], so
//! callers never see backend-specific error types. The original native
//! failure is preserved as an opaque cause for diagnostics and is never
//! interpreted by calling code.

use std::fmt;

/// Result alias used by every fallible bridge operation.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Closed set of failure kinds shared by all backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeErrorKind {
    /// The user dismissed a native picker or dialog. This is a normal,
    /// expected terminal result of interactive operations, not a fault.
    Cancelled,
    /// A native permission or security check refused the operation.
    PermissionDenied,
    /// The selected backend structurally lacks the requested capability.
    NotSupported,
    /// The referenced file, handle or path no longer exists.
    NotFound,
    /// Any other native I/O failure.
    Io,
    /// Failure that could not be classified.
    Unknown,
}

impl BridgeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeErrorKind::Cancelled => "cancelled",
            BridgeErrorKind::PermissionDenied => "permission_denied",
            BridgeErrorKind::NotSupported => "not_supported",
            BridgeErrorKind::NotFound => "not_found",
            BridgeErrorKind::Io => "io_error",
            BridgeErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BridgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Uniform failure value carried by [`BridgeResult`].
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct BridgeError {
    kind: BridgeErrorKind,
    message: String,
    /// The original native failure, kept only for diagnostics.
    cause: Option<anyhow::Error>,
}

impl BridgeError {
    pub fn new(kind: BridgeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn cancelled() -> Self {
        Self::new(BridgeErrorKind::Cancelled, "operation cancelled by user")
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(BridgeErrorKind::PermissionDenied, message)
    }

    /// Synthesized when an adapter is asked for an operation it omits.
    pub fn not_supported(operation: &str) -> Self {
        Self::new(
            BridgeErrorKind::NotSupported,
            format!("operation not supported by this backend: {operation}"),
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(BridgeErrorKind::NotFound, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(BridgeErrorKind::Io, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(BridgeErrorKind::Unknown, message)
    }

    /// Attach the original native failure as an opaque cause.
    pub fn with_cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn kind(&self) -> BridgeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }

    /// Whether this failure is the normal user-dismissal outcome.
    pub fn is_cancelled(&self) -> bool {
        self.kind == BridgeErrorKind::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_are_stable() {
        assert_eq!(BridgeErrorKind::Cancelled.as_str(), "cancelled");
        assert_eq!(BridgeErrorKind::Io.as_str(), "io_error");
        assert_eq!(BridgeErrorKind::NotSupported.as_str(), "not_supported");
    }

    #[test]
    fn cancelled_is_distinguishable() {
        let err = BridgeError::cancelled();
        assert!(err.is_cancelled());
        assert!(!BridgeError::io("disk failure").is_cancelled());
    }

    #[test]
    fn cause_is_preserved_opaquely() {
        let native = std::io::Error::other("device unplugged");
        let err = BridgeError::io("write failed").with_cause(native);
        assert_eq!(err.kind(), BridgeErrorKind::Io);
        let cause = err.cause().expect("cause preserved");
        assert!(cause.to_string().contains("device unplugged"));
    }

    #[test]
    fn not_supported_names_the_operation() {
        let err = BridgeError::not_supported("read_directory");
        assert!(err.message().contains("read_directory"));
        assert_eq!(err.to_string(), format!("not_supported: {}", err.message()));
    }
}
