//! Error types used by the crate.
//!
//! The engine itself never fails on malformed or sparse input: features
//! without usable geometry are skipped and numeric degeneracies resolve to
//! defined fallbacks. The error type covers the configuration boundary,
//! where rejecting bad input is preferable to silently clamping it.

use thiserror::Error;

/// Fieldar error type.
#[derive(Debug, Error)]
pub enum FieldarError {
    /// Overlay options are outside their valid ranges.
    #[error("invalid overlay options: {0}")]
    InvalidOptions(String),
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}
