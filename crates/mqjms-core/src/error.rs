//! Shared error type across mqjms crates.

use thiserror::Error;

/// Boxed parse failure carried by [`JmsError::TypeCoercion`].
pub type CoercionSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable error codes (mirrors the messaging API exception families).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Operation is never supported on this message type.
    UnsupportedOperation,
    /// Argument of a disallowed kind or type.
    InvalidArgument,
    /// Mutation attempted while the message is read-only.
    NotWritable,
    /// Stored property cannot be parsed as the requested type.
    TypeCoercion,
    /// Reserved field with no implementation yet.
    NotImplemented,
    /// Configuration rejected by parsing or validation.
    InvalidConfig,
    /// Transport collaborator failure.
    Transport,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::NotWritable => "NOT_WRITABLE",
            ErrorCode::TypeCoercion => "TYPE_COERCION",
            ErrorCode::NotImplemented => "NOT_IMPLEMENTED",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, JmsError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum JmsError {
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("message not writable")]
    NotWritable,
    #[error("property {name} cannot be read as {target}: {source}")]
    TypeCoercion {
        name: String,
        target: &'static str,
        #[source]
        source: CoercionSource,
    },
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl JmsError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            JmsError::UnsupportedOperation(_) => ErrorCode::UnsupportedOperation,
            JmsError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            JmsError::NotWritable => ErrorCode::NotWritable,
            JmsError::TypeCoercion { .. } => ErrorCode::TypeCoercion,
            JmsError::NotImplemented(_) => ErrorCode::NotImplemented,
            JmsError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            JmsError::Transport(_) => ErrorCode::Transport,
            JmsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
