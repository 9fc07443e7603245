//! Error type shared by the validators and the solver session.

use thiserror::Error;

/// Who is at fault for an [`ArcoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller sent a malformed model, update, parameter or callback reply.
    InvalidArgument,
    /// A backend produced output that violates its contract.
    Internal,
    /// The chosen backend does not support the requested feature.
    Unimplemented,
    /// The session cannot accept this call (retired, or already in use).
    FailedPrecondition,
}

impl ErrorKind {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::Internal => "INTERNAL",
            ErrorKind::Unimplemented => "UNIMPLEMENTED",
            ErrorKind::FailedPrecondition => "FAILED_PRECONDITION",
        }
    }
}

/// Error returned by every fallible Arco operation.
///
/// The message accumulates context from the outermost caller inwards, e.g.
/// `invalid model_parameters: invalid dual_values_filter: ...`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{}] {}", .kind.code(), .message)]
pub struct ArcoError {
    kind: ErrorKind,
    message: String,
}

impl ArcoError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn unimplemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unimplemented, message)
    }

    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FailedPrecondition, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// The message without the code prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prepend `prefix: ` to the message.
    pub fn context(mut self, prefix: impl AsRef<str>) -> Self {
        self.message = format!("{}: {}", prefix.as_ref(), self.message);
        self
    }

    /// Re-tag as [`ErrorKind::Internal`], keeping the message.
    pub fn into_internal(mut self) -> Self {
        self.kind = ErrorKind::Internal;
        self
    }
}

/// Context attachment for `Result<T, ArcoError>`.
pub trait ResultExt<T> {
    /// Prefix the error message with `prefix`.
    fn context(self, prefix: &str) -> Result<T, ArcoError>;

    /// Prefix the error message with a lazily built string.
    fn with_context<F>(self, prefix: F) -> Result<T, ArcoError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, ArcoError> {
    fn context(self, prefix: &str) -> Result<T, ArcoError> {
        self.map_err(|err| err.context(prefix))
    }

    fn with_context<F>(self, prefix: F) -> Result<T, ArcoError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| err.context(prefix()))
    }
}
