//! Error types for gridkit.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Result type alias for gridkit operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by fallible accessors and state validation.
///
/// The pipeline stages themselves never fail; they report problems through
/// structured result fields or degrade to pass-through.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A record has no field with the requested name.
    FieldNotFound {
        field: String,
    },
    /// A value had a different type than required.
    TypeMismatch {
        expected: DataType,
        got: Option<DataType>,
    },
    /// Invalid operation or state.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FieldNotFound { field } => write!(f, "Field not found: {}", field),
            Error::TypeMismatch { expected, got } => match got {
                Some(got) => write!(
                    f,
                    "Type mismatch: expected {}, got {}",
                    expected.name(),
                    got.name()
                ),
                None => write!(f, "Type mismatch: expected {}, got null", expected.name()),
            },
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a field not found error.
    pub fn field_not_found(field: impl Into<String>) -> Self {
        Error::FieldNotFound {
            field: field.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: DataType, got: Option<DataType>) -> Self {
        Error::TypeMismatch { expected, got }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}
