//! Error types for the eigenface pipeline.

use thiserror::Error;

/// Failures surfaced by every stage of the pipeline.
///
/// None of these are retried internally: the computation is deterministic, so an
/// identical call fails identically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EigenfaceError {
    /// No vectors were supplied where at least one is required.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Vector, basis or mean lengths disagree.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
    },

    /// A basis of zero components was requested.
    #[error("Invalid component count: at least one component is required")]
    InvalidComponentCount,

    /// The clamped component count collapsed to zero.
    ///
    /// # When This Occurs
    ///
    /// - A corpus (or class subset) of a single vector
    /// - Vectors of dimension zero
    #[error("Degenerate corpus: {n_samples} sample(s) of dimension {dimension} span no variance")]
    DegenerateCorpus {
        n_samples: usize,
        dimension: usize,
    },

    /// Classification was attempted against no training instances.
    #[error("Empty training set")]
    EmptyTrainingSet,

    /// A class cannot be represented on both sides of a stratified split.
    #[error("Class {label} has {count} sample(s); at least 2 are needed to split it")]
    InsufficientClassSamples {
        label: usize,
        count: usize,
    },

    /// A configuration or input value lies outside its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<serde_json::Error> for EigenfaceError {
    fn from(err: serde_json::Error) -> Self {
        EigenfaceError::InvalidParameter(format!("malformed configuration: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, EigenfaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_details() {
        let err = EigenfaceError::DimensionMismatch { expected: 6, actual: 4 };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 6, got 4");

        let err = EigenfaceError::InsufficientClassSamples { label: 3, count: 1 };
        assert!(err.to_string().contains("Class 3"));
    }

    #[test]
    fn test_json_error_becomes_invalid_parameter() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: EigenfaceError = json_err.into();
        assert!(matches!(err, EigenfaceError::InvalidParameter(_)));
    }
}
