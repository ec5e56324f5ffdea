//! Core error types with the FPxxxx error code system

use thiserror::Error;

use super::error_code::{ErrorCode, ErrorInfo, FP0051, FP0078};
use crate::temporal::TemporalKind;

/// Errors raised by temporal parsing, comparison and arithmetic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    /// The text does not match the grammar, or matches but fails calendar normalization
    #[error("{error_code}: {message}")]
    ParseError {
        error_code: ErrorCode,
        message: String,
        input: String,
    },

    /// Comparison or equality between different temporal kinds
    #[error("{error_code}: cannot compare {left} with {right}")]
    TypeMismatch {
        error_code: ErrorCode,
        left: TemporalKind,
        right: TemporalKind,
    },

    /// An ordering operator was applied to values whose precisions do not overlap
    #[error("{error_code}: '{left}' and '{right}' cannot be ordered at their precisions")]
    Incomparable {
        error_code: ErrorCode,
        left: String,
        right: String,
    },

    /// Calendar arithmetic failed or does not apply to the value kind
    #[error("{error_code}: {message}")]
    ArithmeticError { error_code: ErrorCode, message: String },
}

impl TemporalError {
    /// Create a parse error
    pub fn parse_error(
        error_code: ErrorCode,
        message: impl Into<String>,
        input: impl Into<String>,
    ) -> Self {
        Self::ParseError {
            error_code,
            message: message.into(),
            input: input.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(left: TemporalKind, right: TemporalKind) -> Self {
        Self::TypeMismatch {
            error_code: FP0051,
            left,
            right,
        }
    }

    /// Create an incomparable error for an ordering operator
    pub fn incomparable(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::Incomparable {
            error_code: FP0078,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create an arithmetic error
    pub fn arithmetic_error(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self::ArithmeticError {
            error_code,
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &ErrorCode {
        match self {
            Self::ParseError { error_code, .. } => error_code,
            Self::TypeMismatch { error_code, .. } => error_code,
            Self::Incomparable { error_code, .. } => error_code,
            Self::ArithmeticError { error_code, .. } => error_code,
        }
    }

    /// Get error information with help and documentation
    pub fn error_info(&self) -> &'static ErrorInfo {
        self.error_code().info()
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    pub fn is_incomparable(&self) -> bool {
        matches!(self, Self::Incomparable { .. })
    }
}

/// Result type for temporal operations
pub type Result<T> = std::result::Result<T, TemporalError>;
