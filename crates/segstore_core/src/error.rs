//! Error types for segment store operations.

use thiserror::Error;

/// Result type for segment store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when building or using a segment store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A segment was constructed with an end before its start.
    #[error("invalid segment: end {end} is before start {start}")]
    InvalidSegment {
        /// The requested start.
        start: i64,
        /// The requested end.
        end: i64,
    },

    /// An argument was absent or did not conform to the segment type.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// The operation is not supported by append-only stores.
    #[error("unsupported operation: {operation} (segment stores are append-only)")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// The store was disposed and no longer accepts segments.
    #[error("segment store is disposed")]
    Disposed,

    /// The requested backend is provided by an external collaborator.
    #[error("segment store backend not available: {kind}")]
    BackendUnavailable {
        /// The backend that was requested.
        kind: String,
    },
}

impl StoreError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Creates a backend unavailable error.
    pub fn backend_unavailable(kind: impl Into<String>) -> Self {
        Self::BackendUnavailable { kind: kind.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = StoreError::InvalidSegment { start: 10, end: 4 };
        assert_eq!(err.to_string(), "invalid segment: end 4 is before start 10");

        let err = StoreError::unsupported("remove");
        assert!(err.to_string().contains("remove"));
        assert!(err.to_string().contains("append-only"));

        assert_eq!(StoreError::Disposed.to_string(), "segment store is disposed");
    }

    #[test]
    fn helper_constructors() {
        assert_eq!(
            StoreError::invalid_argument("segment is absent"),
            StoreError::InvalidArgument {
                message: "segment is absent".into()
            }
        );
        assert_eq!(
            StoreError::backend_unavailable("on-disk"),
            StoreError::BackendUnavailable {
                kind: "on-disk".into()
            }
        );
    }
}
