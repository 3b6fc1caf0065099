//! Error types for chemistry lookups.

use thiserror::Error;

/// Result type alias using ChemistryError.
pub type ChemistryResult<T> = Result<T, ChemistryError>;

/// Errors raised while resolving molecular weights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChemistryError {
    #[error("invalid or unsupported element symbol: '{0}'")]
    UnknownElement(String),

    #[error("invalid molecular formula '{formula}': {reason}")]
    InvalidFormula { formula: String, reason: String },

    #[error("profile length mismatch: mixing ratio has {mix} layers, mean molecular weight has {mu}")]
    ProfileMismatch { mix: usize, mu: usize },
}

impl ChemistryError {
    pub fn invalid_formula(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormula {
            formula: formula.into(),
            reason: reason.into(),
        }
    }
}
