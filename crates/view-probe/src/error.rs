//! Error types for inspection operations.

use thiserror::Error;

/// Errors that can occur while navigating a value tree.
///
/// Every accessor fails fast: the first error encountered is returned and no
/// partial result is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectionError {
    /// A requested structural field does not exist on the given value.
    #[error("{type_name} does not have '{label}' attribute")]
    AttributeNotFound { label: String, type_name: String },

    /// A cast or kind-prefix check failed.
    #[error("Type mismatch: {factual} is not {expected}")]
    TypeMismatch { factual: String, expected: String },

    /// The operation is structurally valid but known to be unreachable or
    /// ambiguous. The message names the remedial step.
    #[error("{0}")]
    NotSupported(String),
}

impl InspectionError {
    pub(crate) fn attribute_not_found(label: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::AttributeNotFound {
            label: label.into(),
            type_name: type_name.into(),
        }
    }

    pub(crate) fn type_mismatch(factual: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            factual: factual.into(),
            expected: expected.into(),
        }
    }
}

/// Convenience alias used throughout view-probe.
pub type Result<T> = std::result::Result<T, InspectionError>;
