//! Runtime error types.

use crate::dynamic::DynOp;
use thiserror::Error;

/// Errors that can occur while constructing a target instance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// No constructor registered for the requested type token
    #[error("unknown type token `{0}`")]
    UnknownType(String),

    /// Constructor argument count mismatch
    #[error("constructor for `{type_name}` expects {expected} argument(s), got {got}")]
    Arity {
        /// Target type name
        type_name: &'static str,
        /// Expected argument count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Constructor rejected its arguments or failed internally
    #[error("constructor for `{type_name}` failed: {message}")]
    Failed {
        /// Target type name
        type_name: &'static str,
        /// Failure detail
        message: String,
    },
}

/// Errors that can occur while forwarding an operation to a target.
#[derive(Debug, Error)]
pub enum DynError {
    /// Construction of the target failed before the operation could run
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// The target has no method by the requested name
    #[error("no method `{name}` on `{type_name}`")]
    NoSuchMethod {
        /// Target type name
        type_name: &'static str,
        /// Requested method name
        name: String,
    },

    /// The target has no field by the requested name
    #[error("no field `{name}` on `{type_name}`")]
    NoSuchField {
        /// Target type name
        type_name: &'static str,
        /// Requested field name
        name: String,
    },

    /// The target does not support this operation
    #[error("`{type_name}` does not support {op}")]
    Unsupported {
        /// Target type name
        type_name: &'static str,
        /// The refused operation
        op: DynOp,
    },
}

/// Result alias for forwarded operations
pub type DynResult<T> = Result<T, DynError>;

/// Errors that can occur while autoloading a source file.
#[derive(Debug, Error)]
pub enum AutoloadError {
    /// File I/O error while reading a resolved source file
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
