//! Error types for the synthetic-metrics crate.

use thiserror::Error;

/// Reasons a [`crate::SeriesProfile`] cannot be used for generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// A profile parameter is NaN or infinite.
    #[error("profile field '{field}' must be finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Amplitude or noise is negative.
    #[error("profile field '{field}' must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },

    /// The clamping bounds are inverted.
    #[error("floor {floor} exceeds ceiling {ceiling}")]
    InvertedBounds {
        /// Lower clamping bound.
        floor: f64,
        /// Upper clamping bound.
        ceiling: f64,
    },
}
